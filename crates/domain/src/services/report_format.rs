//! Markers and labels of the generated text report.
//!
//! Shared by the parser and the writer so both agree on one format:
//!
//! ```text
//! 📅 Rapport du lundi 15 janvier 2024
//! ⚠️ 2 courses non payées
//!
//! 💰 Paiements
//! ✅ Payé : 12 500 FCFA
//! ⏳ En attente : 2 500 FCFA
//! ❌ Échoué : 0 FCFA
//!
//! 👤 Awa Koné
//! 🚚 08:30 | Plateau | Cocody | 2 500 FCFA | Payé | CMD-001
//!
//! 📊 Récapitulatif par livreur
//! • Awa Koné 2 500 FCFA (1 Courses)
//!    ◦ Taux de réussite : 100%
//! ══════════════════════════════
//! ```

/// Line separating two period sections.
pub const SECTION_DELIMITER: &str = "══════════════════════════════";

pub const TITLE_GLYPH: &str = "📅";
pub const WARNING_GLYPH: &str = "⚠️";
pub const PAYMENTS_HEADER: &str = "💰 Paiements";
pub const PAID_GLYPH: &str = "✅";
pub const PENDING_GLYPH: &str = "⏳";
pub const FAILED_GLYPH: &str = "❌";
pub const OPERATOR_GLYPH: &str = "👤";
pub const COURSE_GLYPH: &str = "🚚";
pub const SUMMARY_HEADER: &str = "📊 Récapitulatif par livreur";
pub const SUMMARY_BULLET: &str = "•";
pub const STAT_BULLET: &str = "◦";

/// Field separator of course lines.
pub const COURSE_FIELD_SEPARATOR: char = '|';

/// Minimum number of fields of a usable course line.
pub const MIN_COURSE_FIELDS: usize = 5;

/// Lines scanned after an operator summary for its statistics.
pub const STATS_LOOKAHEAD: usize = 10;

/// Lowercase marker of the unpaid courses warning. Matches both
/// "1 course non payée" and "3 courses non payées".
pub const UNPAID_MARKER: &str = "non payée";

pub const PAID_LABEL: &str = "Payé";
pub const PENDING_LABEL: &str = "En attente";
pub const FAILED_LABEL: &str = "Échoué";

pub const SUCCESS_RATE_LABEL: &str = "Taux de réussite";
pub const BEST_CITY_LABEL: &str = "Meilleure ville";
pub const BEST_CLIENT_LABEL: &str = "Meilleur client";
pub const BEST_DAY_LABEL: &str = "Meilleur jour";
pub const BEST_WEEK_LABEL: &str = "Meilleure semaine";
pub const BEST_MONTH_LABEL: &str = "Meilleur mois";

/// Title keyword of weekly sections.
pub const WEEK_KEYWORD: &str = "semaine";

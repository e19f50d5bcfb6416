//! Default color palettes, one per call site.
//!
//! Values are cosmetic; what matters is that each call site always hands the
//! renderer the same ordered list.

pub const METRIC: &[&str] = &["#3b82f6", "#10b981", "#f59e0b", "#ef4444", "#8b5cf6", "#06b6d4"];
pub const TABLE_AREA: &[&str] = &["#3b82f6", "#93c5fd", "#1d4ed8"];
pub const TABLE_LINE: &[&str] = &["#10b981", "#6ee7b7", "#047857"];
pub const TABLE_BAR: &[&str] = &["#6366f1", "#8b5cf6", "#a855f7", "#d946ef"];
pub const TABLE_PIE: &[&str] = &["#3b82f6", "#10b981", "#f59e0b", "#ef4444", "#8b5cf6", "#ec4899"];
pub const TABLE: &[&str] = &["#64748b", "#94a3b8", "#cbd5e1"];
pub const SERIES_AREA: &[&str] = &["#0ea5e9", "#7dd3fc", "#0369a1"];
pub const SERIES_LINE: &[&str] = &["#f97316", "#fdba74", "#c2410c"];
pub const LIST_BAR: &[&str] = &["#14b8a6", "#2dd4bf", "#5eead4", "#99f6e4"];
pub const LIST_PIE: &[&str] = &["#f43f5e", "#fb923c", "#facc15", "#4ade80", "#22d3ee", "#a78bfa"];

pub fn owned(palette: &[&str]) -> Vec<String> {
    palette.iter().map(|c| c.to_string()).collect()
}

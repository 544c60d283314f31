pub struct Icons;

impl Icons {
    pub const BOOK: &str = "📚";
    pub const CHECK: &str = "✅";
    pub const CROSS: &str = "❌";
    pub const WARN: &str = "⚠️";
    pub const INFO: &str = "ℹ️";
    pub const STATS: &str = "📊";
    pub const DATABASE: &str = "🗄️";
    pub const IMAGE: &str = "🖼️";
    pub const IMPORT: &str = "📥";
    pub const NEW: &str = "✨";
    pub const DEL: &str = "🗑️";
    pub const PEN: &str = "📝";
    pub const GLOBE: &str = "🌍";
}

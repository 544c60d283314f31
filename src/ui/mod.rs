pub mod icons;
pub mod output;
pub mod progress;
pub mod table;
pub mod theme;

pub use icons::Icons;
pub use output::{detail_row, error, header, info, section, success, warn};
pub use progress::Spinner;
pub use table::book_table;
pub use theme::{theme, Theme};

pub mod analytics;
pub mod assistant;
pub mod history;
pub mod parser;
pub mod writer;

pub use analytics::AnalyticsView;
pub use assistant::AssistantView;
pub use history::HistoryView;
pub use parser::ParserView;
pub use writer::WriterView;

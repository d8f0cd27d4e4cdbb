pub mod daily_report;
pub mod message;
pub mod work_record;

pub use daily_report::DailyReport;
pub use message::{ConversationMessage, Speaker};
pub use work_record::WorkRecord;

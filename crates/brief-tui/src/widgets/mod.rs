//! Custom widgets for the TUI

pub mod input_box;
pub mod message_list;
pub mod spinner;
pub mod summary_card;

pub use input_box::InputBox;
pub use message_list::MessageList;
pub use spinner::Spinner;
pub use summary_card::SummaryCard;

//! Application Pages

mod checklist;
mod checklist_detail;
mod checklist_list;
mod login;
mod reception;
mod transfer;
mod work_order_exit;

pub use checklist::*;
pub use checklist_detail::*;
pub use checklist_list::*;
pub use login::*;
pub use reception::*;
pub use transfer::*;
pub use work_order_exit::*;

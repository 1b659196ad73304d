pub mod stage;
pub mod task;
pub mod task_list;

pub use stage::Stage;
pub use task::{Priority, Task, DEFAULT_DELIMITER};
pub use task_list::TaskList;

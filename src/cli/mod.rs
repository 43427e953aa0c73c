mod commands;
mod handlers;

pub use commands::{AddArgs, Cli, Commands, EditArgs};
pub use handlers::{handle_add, handle_edit, handle_get, handle_list, handle_rm, handle_serve};

//! Battle rules: legality, movement, interaction, damage, turn resolution and victory.

pub mod commands;
pub mod damage;
pub mod interaction;
pub mod transitions;
pub mod turn;
pub mod victory;

pub use commands::{is_valid_command, valid_commands};
pub use interaction::resolve_command_interaction;
pub use turn::process_turn;
pub use victory::{check_after_turn, check_on_give_up, check_on_timeout};

/// Connection flags shared by every subcommand.
pub mod connection;
/// Offline decode of captured output.
pub mod decode;
/// Typed `p4 describe` view.
pub mod describe;
/// Typed `p4 fixes` view.
pub mod fixes;
/// Record and value rendering.
pub mod print;
/// Pass-through without `-G`.
pub mod raw;
/// Generic `-G` command.
pub mod run;

#[cfg(test)]
mod test_support;

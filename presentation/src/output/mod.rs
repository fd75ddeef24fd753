pub mod console;
pub mod formatter;
pub mod live;

/// Force colored output on or off for the whole process
pub fn set_color(enabled: bool) {
    colored::control::set_override(enabled);
}

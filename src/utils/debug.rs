use once_cell::sync::Lazy;

pub const DEBUG_ENV: &str = "TOKENPLAN_DEBUG";

/// Read once; `TOKENPLAN_DEBUG=0` or an empty value leaves tracing off
pub static DEBUG_MODE: Lazy<bool> =
    Lazy::new(|| flag_enabled(std::env::var(DEBUG_ENV).ok().as_deref()));

fn flag_enabled(value: Option<&str>) -> bool {
    match value.map(str::trim) {
        None | Some("") | Some("0") => false,
        Some(v) => !v.eq_ignore_ascii_case("false"),
    }
}

/// Trace a pricing step on stderr, tagged with the calling module.
///
/// stdout may carry JSON, so nothing here ever writes to it.
///
/// ```
/// use tokenplan::debug_println;
///
/// let tokens = 700;
/// debug_println!("monthly={}", tokens);
/// ```
#[macro_export]
macro_rules! debug_println {
    ($($arg:tt)*) => {
        if *$crate::utils::debug::DEBUG_MODE {
            eprintln!("[{}] {}", module_path!(), format_args!($($arg)*));
        }
    };
}

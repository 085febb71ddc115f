/// Asserts that an expression matches a pattern, optionally with a guard.
#[macro_export]
macro_rules! assert_matches {
    ($expr:expr, $pat:pat $(if $guard:expr)? $(,)?) => {
        match $expr {
            $pat $(if $guard)? => (),
            ref val => ::core::panic!(
                "assertion failed: `{:?}` does not match `{}`",
                val,
                ::core::stringify!($pat $(if $guard)?),
            ),
        }
    };
}

//! Helper macros.

/// Declares the procedure table.
///
/// Each entry reads `Symbol => field: fn(args) -> ret;`, where `Symbol` is
/// the driver entry point without its `gl` prefix. Entries under `core` must
/// all resolve for a table to be usable; entries under `extension` may be
/// missing.
///
/// Expands to the `CORE_PROCS` and `EXTENSION_PROCS` name lists and the
/// `Procs` struct with one [`Proc`] per entry. The invoking module must have
/// `Proc`, `GetErrorFn` and `c_void` in scope.
///
/// [`Proc`]: slot/struct.Proc.html
macro_rules! declare_procs {
    (
        core {
            $($core:ident => $core_field:ident: fn($($core_arg:ty),*) $(-> $core_ret:ty)?;)*
        }
        extension {
            $($ext:ident => $ext_field:ident: fn($($ext_arg:ty),*) $(-> $ext_ret:ty)?;)*
        }
    ) => {
        /// Symbols that must resolve for a table to be valid, in declaration order.
        pub const CORE_PROCS: &[&str] = &[$(concat!("gl", stringify!($core))),*];

        /// Symbols that are allowed to be missing, in declaration order.
        pub const EXTENSION_PROCS: &[&str] = &[$(concat!("gl", stringify!($ext))),*];

        /// One slot per declared entry point.
        ///
        /// Field names are the snake case of the symbol, so `glClearColor`
        /// lives in `clear_color`.
        #[allow(missing_docs)]
        pub struct Procs {
            $(pub $core_field: Proc<unsafe extern "system" fn($($core_arg),*) $(-> $core_ret)?>,)*
            $(pub $ext_field: Proc<unsafe extern "system" fn($($ext_arg),*) $(-> $ext_ret)?>,)*
        }

        impl Procs {
            /// Resolves every declared symbol once, in declaration order.
            pub(crate) fn resolve<R>(
                resolver: &mut R,
                core_error_fn: Option<GetErrorFn>,
                extension_error_fn: Option<GetErrorFn>,
            ) -> Self
                where R: FnMut(&str) -> *const c_void
            {
                Procs {
                    $($core_field: Proc::resolve(
                        concat!("gl", stringify!($core)),
                        &mut *resolver,
                        core_error_fn,
                    ),)*
                    $($ext_field: Proc::resolve(
                        concat!("gl", stringify!($ext)),
                        &mut *resolver,
                        extension_error_fn,
                    ),)*
                }
            }

            /// Core symbols that did not resolve.
            pub fn missing_core_procs(&self) -> Vec<&'static str> {
                let mut missing = Vec::new();
                $(
                    if !self.$core_field.is_available() {
                        missing.push(concat!("gl", stringify!($core)));
                    }
                )*
                missing
            }

            /// Extension symbols that did not resolve.
            pub fn missing_extension_procs(&self) -> Vec<&'static str> {
                let mut missing = Vec::new();
                $(
                    if !self.$ext_field.is_available() {
                        missing.push(concat!("gl", stringify!($ext)));
                    }
                )*
                missing
            }

            /// Empties every slot.
            pub fn reset(&mut self) {
                $(self.$core_field.reset();)*
                $(self.$ext_field.reset();)*
            }
        }
    };
}

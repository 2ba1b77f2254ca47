//! Typed procedure slots.

use std::{fmt, mem};
use std::os::raw::c_void;

use gl;
use gl::GetErrorFn;

/// A function pointer type that may be stored in a [`Proc`].
///
/// Implemented for `unsafe extern "system" fn` pointers of up to nine
/// arguments, which covers every entry point in the table.
///
/// [`Proc`]: struct.Proc.html
pub trait ProcFn: Copy {
    /// Reinterprets a resolved address as this function type.
    ///
    /// # Safety
    ///
    /// `ptr` must be non-null and point to a function with this signature.
    unsafe fn from_ptr(ptr: *const c_void) -> Self;

    /// Returns the address of the function.
    fn as_ptr(self) -> *const c_void;
}

/// One named, typed driver entry point.
///
/// A slot without a function pointer is unavailable; calling it panics.
pub struct Proc<F> {
    /// Driver symbol name, e.g. `glClear`.
    name: Option<&'static str>,

    /// The resolved function.
    function: Option<F>,

    /// Queried after every call when present.
    error_fn: Option<GetErrorFn>,
}

impl<F: ProcFn> Proc<F> {
    /// Creates an unresolved slot.
    pub fn new(name: &'static str) -> Self {
        Proc {
            name: Some(name),
            function: None,
            error_fn: None,
        }
    }

    /// Resolves `name` through `resolver`.
    ///
    /// `error_fn` is only bound when the symbol resolved. The resolved
    /// address is trusted to have signature `F`, which only holds for the
    /// declared symbol table, so this stays crate-private.
    pub(crate) fn resolve<R>(name: &'static str, resolver: &mut R, error_fn: Option<GetErrorFn>) -> Self
        where R: FnMut(&str) -> *const c_void
    {
        let address = resolver(name);
        if address.is_null() {
            return Proc::new(name);
        }
        Proc {
            name: Some(name),
            function: Some(unsafe { F::from_ptr(address) }),
            error_fn,
        }
    }

    /// The driver symbol name, or `None` after [`reset`].
    ///
    /// [`reset`]: #method.reset
    pub fn name(&self) -> Option<&'static str> {
        self.name
    }

    /// Returns the raw function pointer.
    pub fn function(&self) -> Option<F> {
        self.function
    }

    /// Whether the entry point resolved.
    pub fn is_available(&self) -> bool {
        self.function.is_some()
    }

    /// Whether calls through this slot are followed by `glGetError`.
    pub fn is_error_checked(&self) -> bool {
        self.error_fn.is_some()
    }

    /// Binds or unbinds the post-call error query.
    pub fn set_error_fn(&mut self, error_fn: Option<GetErrorFn>) {
        self.error_fn = error_fn;
    }

    /// Clears the name, function and error query.
    pub fn reset(&mut self) {
        self.name = None;
        self.function = None;
        self.error_fn = None;
    }

    fn expect_function(&self) -> F {
        match self.function {
            Some(function) => function,
            None => panic!("{} is not available", self.name.unwrap_or("<reset>")),
        }
    }

    fn name_or_empty(&self) -> &'static str {
        self.name.unwrap_or("")
    }
}

impl<F> fmt::Debug for Proc<F> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Proc")
            .field("name", &self.name)
            .field("available", &self.function.is_some())
            .field("error_checked", &self.error_fn.is_some())
            .finish()
    }
}

macro_rules! impl_proc_fn {
    ($($arg:ident),*) => {
        impl<Ret, $($arg),*> ProcFn for unsafe extern "system" fn($($arg),*) -> Ret {
            unsafe fn from_ptr(ptr: *const c_void) -> Self {
                debug_assert!(!ptr.is_null());
                mem::transmute_copy::<*const c_void, Self>(&ptr)
            }

            fn as_ptr(self) -> *const c_void {
                self as *const c_void
            }
        }

        impl<Ret, $($arg),*> Proc<unsafe extern "system" fn($($arg),*) -> Ret>
            where $($arg: Copy + fmt::Debug),*
        {
            /// Calls the driver function, then checks `glGetError` if an
            /// error query is bound.
            ///
            /// # Safety
            ///
            /// The arguments must satisfy the driver's contract for this
            /// entry point, and the owning context must be current.
            ///
            /// # Panics
            ///
            /// If the slot is unavailable, or the driver reports an error.
            /// Both are programming errors; the panic must not be caught and
            /// the context must not be used afterwards.
            #[allow(non_snake_case)]
            #[inline]
            pub unsafe fn call(&self, $($arg: $arg),*) -> Ret {
                let function = self.expect_function();
                trace!(target: "gl", "{}{:?}", self.name_or_empty(), ($($arg,)*));
                let result = function($($arg),*);
                gl::check_error(self.error_fn, self.name_or_empty());
                result
            }
        }
    };
}

impl_proc_fn!();
impl_proc_fn!(A);
impl_proc_fn!(A, B);
impl_proc_fn!(A, B, C);
impl_proc_fn!(A, B, C, D);
impl_proc_fn!(A, B, C, D, E);
impl_proc_fn!(A, B, C, D, E, F);
impl_proc_fn!(A, B, C, D, E, F, G);
impl_proc_fn!(A, B, C, D, E, F, G, H);
impl_proc_fn!(A, B, C, D, E, F, G, H, I);

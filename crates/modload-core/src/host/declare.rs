//! Name export for native modules.

/// Export the name a native module declares for itself.
///
/// Expands to `extern "C" fn modload_module_name() -> *const c_char`
/// returning a static NUL-terminated string.
#[macro_export]
macro_rules! declare_module {
    ($name:literal) => {
        #[allow(unsafe_code)]
        #[no_mangle]
        pub extern "C" fn modload_module_name() -> *const ::std::ffi::c_char {
            concat!($name, "\0").as_ptr().cast()
        }
    };
}

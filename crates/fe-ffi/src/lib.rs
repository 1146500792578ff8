//! C entry points for the Fe grammar
//!
//! `tree_sitter_fe()` hands out a pointer to the process-lifetime built-in
//! [`Language`]. Callers treat it as opaque and never free it. It is not a
//! tree-sitter runtime table, so it only works with the accessors here. The
//! matching declarations live in `include/fe.h`.

use fe_grammar::Language;
use libc::c_char;
use std::ffi::CString;
use std::ptr;
use std::sync::LazyLock;

static BUILTIN_NAME: LazyLock<Option<CString>> =
    LazyLock::new(|| CString::new(fe_grammar::builtin().name()).ok());

/// Get the Fe grammar handle
#[no_mangle]
pub extern "C" fn tree_sitter_fe() -> *const Language {
    fe_grammar::builtin()
}

/// ABI version of a grammar handle, or 0 for null
///
/// # Safety
///
/// `language` must be null or a pointer returned by [`tree_sitter_fe`].
#[no_mangle]
pub unsafe extern "C" fn tree_sitter_fe_version(language: *const Language) -> u32 {
    match language.as_ref() {
        Some(language) => language.version(),
        None => 0,
    }
}

/// NUL-terminated grammar name, or null for a null handle
///
/// # Safety
///
/// `language` must be null or a pointer returned by [`tree_sitter_fe`].
/// The returned string lives for the rest of the process.
#[no_mangle]
pub unsafe extern "C" fn tree_sitter_fe_name(language: *const Language) -> *const c_char {
    let Some(language) = language.as_ref() else {
        return ptr::null();
    };

    match BUILTIN_NAME.as_ref() {
        Some(name) if name.as_bytes() == language.name().as_bytes() => name.as_ptr(),
        _ => ptr::null(),
    }
}

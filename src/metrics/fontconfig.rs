// src/metrics/fontconfig.rs

//! Font family name -> font file resolution through the Fontconfig FFI.

use anyhow::{anyhow, Result};
use fontconfig_sys::constants::{FC_FAMILY, FC_FILE};
use fontconfig_sys::{
    FcChar8, FcConfigSubstitute, FcDefaultSubstitute, FcFontMatch, FcInit, FcMatchPattern,
    FcPatternAddString, FcPatternCreate, FcPatternDestroy, FcPatternGetString, FcResultMatch,
};
use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::path::PathBuf;
use std::ptr;

/// Resolve a font family name to the file Fontconfig would pick for it.
///
/// Follows the standard match sequence: build a pattern for the family,
/// apply config and default substitutions, then take `FC_FILE` off the
/// matched pattern.
pub fn find_font_file(family: &str) -> Result<PathBuf> {
    let family_c = CString::new(family)
        .map_err(|_| anyhow!("font family name '{family}' contains a NUL byte"))?;

    // SAFETY: all Fontconfig calls are FFI. Patterns created here are
    // destroyed on every path out of the block; `family_c` outlives the
    // pattern it is copied into by FcPatternAddString.
    unsafe {
        if FcInit() == 0 {
            return Err(anyhow!("fontconfig initialization failed"));
        }

        let pattern = FcPatternCreate();
        if pattern.is_null() {
            return Err(anyhow!("FcPatternCreate failed"));
        }
        if FcPatternAddString(
            pattern,
            FC_FAMILY.as_ptr(),
            family_c.as_ptr() as *const FcChar8,
        ) == 0
        {
            FcPatternDestroy(pattern);
            return Err(anyhow!("FcPatternAddString failed for family '{family}'"));
        }

        FcConfigSubstitute(ptr::null_mut(), pattern, FcMatchPattern);
        FcDefaultSubstitute(pattern);

        let mut result = FcResultMatch;
        let matched = FcFontMatch(ptr::null_mut(), pattern, &mut result);
        FcPatternDestroy(pattern);
        if matched.is_null() || result != FcResultMatch {
            return Err(anyhow!("fontconfig found no match for family '{family}'"));
        }

        let mut file_ptr: *mut FcChar8 = ptr::null_mut();
        let status = FcPatternGetString(matched, FC_FILE.as_ptr(), 0, &mut file_ptr);
        let path = if status == FcResultMatch && !file_ptr.is_null() {
            let file = CStr::from_ptr(file_ptr as *const c_char)
                .to_string_lossy()
                .into_owned();
            Some(PathBuf::from(file))
        } else {
            None
        };
        FcPatternDestroy(matched);

        path.ok_or_else(|| anyhow!("matched pattern for '{family}' carries no file path"))
    }
}

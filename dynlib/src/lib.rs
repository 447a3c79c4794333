use std::ffi::{CStr, c_void};
use std::mem::transmute_copy;
use std::ptr::NonNull;

use anyhow::{Context as _, anyhow};
use libc::{dlclose, dlerror, dlopen, dlsym};

// NOTE: dlerror returns a pointer into thread-local storage owned by libc, it must not be freed.
unsafe fn last_dlerror() -> Option<String> {
    let err = unsafe { dlerror() };
    if err.is_null() {
        None
    } else {
        Some(unsafe { CStr::from_ptr(err) }.to_string_lossy().into_owned())
    }
}

pub struct DynLib(NonNull<c_void>);

impl DynLib {
    pub fn open(filename: &CStr) -> anyhow::Result<Self> {
        unsafe {
            let handle = dlopen(filename.as_ptr(), libc::RTLD_LAZY);
            NonNull::new(handle).map(Self).ok_or_else(|| {
                anyhow!(last_dlerror().unwrap_or_else(|| format!("could not open {filename:?}")))
            })
        }
    }

    /// tries each of the filenames in order, returns the first one that opens.
    pub fn open_first(filenames: &[&CStr]) -> anyhow::Result<Self> {
        let mut errors = Vec::with_capacity(filenames.len());
        for filename in filenames {
            match Self::open(filename) {
                Ok(this) => {
                    log::debug!("opened {filename:?}");
                    return Ok(this);
                }
                Err(err) => errors.push(err.to_string()),
            }
        }
        Err(anyhow!(errors.join("; "))).with_context(|| format!("could not open any of {filenames:?}"))
    }

    /// returns the raw address of the symbol, or `None` if it is not exported.
    pub fn lookup_ptr(&self, name: &CStr) -> Option<NonNull<c_void>> {
        unsafe {
            _ = dlerror();
            let addr = dlsym(self.0.as_ptr(), name.as_ptr());
            if last_dlerror().is_some() {
                None
            } else {
                NonNull::new(addr)
            }
        }
    }

    pub fn lookup<F: Sized>(&self, name: &CStr) -> anyhow::Result<F> {
        assert_eq!(size_of::<F>(), size_of::<*mut c_void>());

        unsafe {
            _ = dlerror();

            let addr = dlsym(self.0.as_ptr(), name.as_ptr());

            if let Some(err) = last_dlerror() {
                Err(anyhow!(err))
            } else if addr.is_null() {
                Err(anyhow!("symbol {name:?} resolved to null"))
            } else {
                Ok(transmute_copy(&addr))
            }
        }
    }
}

impl Drop for DynLib {
    fn drop(&mut self) {
        unsafe {
            dlclose(self.0.as_ptr());
        }
    }
}

#[macro_export]
macro_rules! opaque_struct {
    ($name:ident) => {
        #[repr(C)]
        pub struct $name {
            _data: [u8; 0],
            _marker: std::marker::PhantomData<(*mut u8, std::marker::PhantomPinned)>,
        }
    };
}

#[cfg(test)]
mod tests {
    use std::ffi::{c_char, c_void};

    use super::*;

    #[test]
    fn open_missing_library() {
        let err = DynLib::open(c"libdoes-not-exist.so.42").err().unwrap();
        assert!(!err.to_string().is_empty());
    }

    #[test]
    fn open_first_falls_through() {
        let lib = DynLib::open_first(&[c"libdoes-not-exist.so.42", c"libc.so.6"]);
        assert!(lib.is_ok());

        let err = DynLib::open_first(&[c"libnope.so.1", c"libnope.so.2"]).err().unwrap();
        assert!(format!("{err:#}").contains("libnope.so.2"));
    }

    #[test]
    fn lookup_libc_symbol() {
        let lib = DynLib::open(c"libc.so.6").unwrap();
        let strlen: unsafe extern "C" fn(*const c_char) -> usize = lib.lookup(c"strlen").unwrap();
        assert_eq!(unsafe { strlen(c"triangle".as_ptr()) }, 8);

        assert!(lib.lookup_ptr(c"strlen").is_some());
        assert!(lib.lookup_ptr(c"definitely_not_a_libc_symbol").is_none());
        assert!(
            lib.lookup::<*mut c_void>(c"definitely_not_a_libc_symbol")
                .is_err()
        );
    }
}

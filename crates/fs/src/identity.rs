use std::collections::HashMap;
use std::sync::Mutex;

/// Maps numeric owner/group ids to names.
pub trait IdentityResolver: Sync {
    fn user_name(&self, uid: u32) -> Option<String>;
    fn group_name(&self, gid: u32) -> Option<String>;

    /// Name for `uid`, falling back to the id itself.
    fn owner_of(&self, uid: u32) -> String {
        self.user_name(uid).unwrap_or_else(|| uid.to_string())
    }

    /// Name for `gid`, falling back to the id itself.
    fn group_of(&self, gid: u32) -> String {
        self.group_name(gid).unwrap_or_else(|| gid.to_string())
    }
}

/// Resolver backed by the system user and group databases.
///
/// Lookups, including misses, are cached for the lifetime of the resolver.
#[derive(Debug, Default)]
pub struct SystemIdentityResolver {
    users: Mutex<HashMap<u32, Option<String>>>,
    groups: Mutex<HashMap<u32, Option<String>>>,
}

impl SystemIdentityResolver {
    pub fn new() -> Self {
        Self::default()
    }
}

fn cached(
    cache: &Mutex<HashMap<u32, Option<String>>>,
    id: u32,
    lookup: fn(u32) -> Option<String>,
) -> Option<String> {
    let mut map = cache.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    map.entry(id).or_insert_with(|| lookup(id)).clone()
}

impl IdentityResolver for SystemIdentityResolver {
    fn user_name(&self, uid: u32) -> Option<String> {
        cached(&self.users, uid, sys::lookup_user)
    }

    fn group_name(&self, gid: u32) -> Option<String> {
        cached(&self.groups, gid, sys::lookup_group)
    }
}

#[cfg(unix)]
mod sys {
    use std::ffi::CStr;

    use log::debug;

    const INITIAL_BUF: usize = 1024;
    const MAX_BUF: usize = 1 << 20;

    pub(super) fn lookup_user(uid: u32) -> Option<String> {
        let mut buf = vec![0 as libc::c_char; INITIAL_BUF];
        loop {
            // SAFETY: all-zero is a valid bit pattern for the plain C struct.
            let mut pwd: libc::passwd = unsafe { std::mem::zeroed() };
            let mut result: *mut libc::passwd = std::ptr::null_mut();
            // SAFETY: `buf` outlives the call and its length is passed along.
            let rc = unsafe {
                libc::getpwuid_r(
                    uid as libc::uid_t,
                    &mut pwd,
                    buf.as_mut_ptr(),
                    buf.len(),
                    &mut result,
                )
            };

            if rc == libc::ERANGE && buf.len() < MAX_BUF {
                buf.resize(buf.len() * 2, 0);
                continue;
            }
            if rc != 0 || result.is_null() || pwd.pw_name.is_null() {
                debug!("[identity] no user entry for uid {uid} (rc={rc})");
                return None;
            }
            // SAFETY: pw_name points into `buf`, NUL-terminated by libc.
            let name = unsafe { CStr::from_ptr(pwd.pw_name) };
            return Some(name.to_string_lossy().into_owned());
        }
    }

    pub(super) fn lookup_group(gid: u32) -> Option<String> {
        let mut buf = vec![0 as libc::c_char; INITIAL_BUF];
        loop {
            // SAFETY: all-zero is a valid bit pattern for the plain C struct.
            let mut grp: libc::group = unsafe { std::mem::zeroed() };
            let mut result: *mut libc::group = std::ptr::null_mut();
            // SAFETY: `buf` outlives the call and its length is passed along.
            let rc = unsafe {
                libc::getgrgid_r(
                    gid as libc::gid_t,
                    &mut grp,
                    buf.as_mut_ptr(),
                    buf.len(),
                    &mut result,
                )
            };

            if rc == libc::ERANGE && buf.len() < MAX_BUF {
                buf.resize(buf.len() * 2, 0);
                continue;
            }
            if rc != 0 || result.is_null() || grp.gr_name.is_null() {
                debug!("[identity] no group entry for gid {gid} (rc={rc})");
                return None;
            }
            // SAFETY: gr_name points into `buf`, NUL-terminated by libc.
            let name = unsafe { CStr::from_ptr(grp.gr_name) };
            return Some(name.to_string_lossy().into_owned());
        }
    }
}

#[cfg(not(unix))]
mod sys {
    pub(super) fn lookup_user(_uid: u32) -> Option<String> {
        None
    }

    pub(super) fn lookup_group(_gid: u32) -> Option<String> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed;

    impl IdentityResolver for Fixed {
        fn user_name(&self, uid: u32) -> Option<String> {
            (uid == 1000).then(|| "alice".to_string())
        }

        fn group_name(&self, _gid: u32) -> Option<String> {
            None
        }
    }

    #[test]
    fn unknown_ids_fall_back_to_numbers() {
        let r = Fixed;
        assert_eq!(r.owner_of(1000), "alice");
        assert_eq!(r.owner_of(4242), "4242");
        assert_eq!(r.group_of(7), "7");
    }

    #[cfg(unix)]
    #[test]
    fn system_resolver_knows_root() {
        let r = SystemIdentityResolver::new();
        assert_eq!(r.user_name(0).as_deref(), Some("root"));
        // second call is served from the cache
        assert_eq!(r.user_name(0).as_deref(), Some("root"));
    }
}

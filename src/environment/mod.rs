// src/environment/mod.rs

//! Environment resolution for child processes.
//!
//! The child never sees the host environment wholesale. It gets the request's
//! explicit overrides plus a handful of inherited fallbacks that external
//! tools need to work at all:
//!
//! - `PATH`: kubeconfig files can reference credential helper programs
//!   (e.g. cloud auth plugins) that must be found on the search path.
//! - `KUBECONFIG`: honour ambient cluster selection; when unset the tool
//!   falls back to its own default location.
//! - `HOME`: client libraries locate `$HOME/.kube/config` and friends from
//!   it. If the host has no `HOME`, the OS user home directory is used.
//!
//! Resolution is a pure function of the overrides and an [`EnvLookup`], so
//! tests inject [`mock::MockEnv`] instead of touching the real process
//! environment.

use std::collections::BTreeMap;
use std::env::VarError;
use std::fmt::{self, Debug};
use std::path::PathBuf;

use tracing::warn;

pub mod mock;

/// Keys that are filled from the inherited environment when not overridden.
pub const FALLBACK_KEYS: [&str; 3] = ["PATH", "KUBECONFIG", "HOME"];

/// Read-only view of inherited process state.
pub trait EnvLookup: Send + Sync + Debug {
    /// Value of an inherited environment variable.
    fn var(&self, key: &str) -> Option<String>;

    /// The OS notion of the current user's home directory.
    fn home_dir(&self) -> Option<PathBuf>;
}

/// Lookup backed by the real process environment.
#[derive(Debug, Clone, Default)]
pub struct ProcessEnv;

impl EnvLookup for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        unicode_value(key, std::env::var(key))
    }

    #[allow(deprecated)]
    fn home_dir(&self) -> Option<PathBuf> {
        std::env::home_dir()
    }
}

/// Keep a UTF-8 value; a value that is set but not UTF-8 is dropped with a
/// warning so a vanished `PATH` is visible in the logs.
fn unicode_value(key: &str, value: Result<String, VarError>) -> Option<String> {
    match value {
        Ok(v) => Some(v),
        Err(VarError::NotPresent) => None,
        Err(VarError::NotUnicode(raw)) => {
            warn!(
                variable = key,
                value = ?raw,
                "inherited variable is not valid UTF-8; not passing it to the child"
            );
            None
        }
    }
}

/// Final environment handed to a child process.
///
/// Built fresh for every invocation; never cached.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedEnvironment(BTreeMap<String, String>);

impl ResolvedEnvironment {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ResolvedEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (k, v)) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{k}={v}")?;
        }
        f.write_str("}")
    }
}

/// Compute the environment for one invocation.
///
/// Overrides always win. Each key in [`FALLBACK_KEYS`] that is still missing
/// is taken from `lookup`; a fallback with no (or an empty) value leaves the
/// key out entirely.
pub fn resolve_environment(
    overrides: Option<&BTreeMap<String, String>>,
    lookup: &dyn EnvLookup,
) -> ResolvedEnvironment {
    let mut env = overrides.cloned().unwrap_or_default();

    for key in FALLBACK_KEYS {
        if env.contains_key(key) {
            continue;
        }
        if let Some(value) = fallback_value(key, lookup) {
            env.insert(key.to_string(), value);
        }
    }

    ResolvedEnvironment(env)
}

fn fallback_value(key: &str, lookup: &dyn EnvLookup) -> Option<String> {
    let inherited = lookup.var(key).filter(|v| !v.is_empty());

    match key {
        "HOME" => inherited.or_else(|| {
            lookup
                .home_dir()
                .and_then(|p| p.to_str().map(str::to_string))
                .filter(|v| !v.is_empty())
        }),
        _ => inherited,
    }
}

#[cfg(test)]
mod tests {
    use super::mock::MockEnv;
    use super::*;

    fn overrides(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn override_beats_inherited_value() {
        let lookup = MockEnv::new().with_var("PATH", "/usr/bin");
        let ov = overrides(&[("PATH", "/opt/tools/bin")]);

        let env = resolve_environment(Some(&ov), &lookup);
        assert_eq!(env.get("PATH"), Some("/opt/tools/bin"));
    }

    #[test]
    fn inherited_fallbacks_fill_missing_keys() {
        let lookup = MockEnv::new()
            .with_var("PATH", "/usr/bin:/bin")
            .with_var("KUBECONFIG", "/etc/kube/config")
            .with_var("HOME", "/home/ci");

        let env = resolve_environment(None, &lookup);
        assert_eq!(env.get("PATH"), Some("/usr/bin:/bin"));
        assert_eq!(env.get("KUBECONFIG"), Some("/etc/kube/config"));
        assert_eq!(env.get("HOME"), Some("/home/ci"));
        assert_eq!(env.len(), 3);
    }

    #[test]
    fn only_fallback_keys_are_inherited() {
        let lookup = MockEnv::new()
            .with_var("PATH", "/usr/bin")
            .with_var("AWS_SECRET_ACCESS_KEY", "nope");

        let env = resolve_environment(None, &lookup);
        assert!(!env.contains_key("AWS_SECRET_ACCESS_KEY"));
    }

    #[test]
    fn home_falls_back_to_os_home_dir() {
        let lookup = MockEnv::new().with_home_dir("/var/lib/builder");

        let env = resolve_environment(None, &lookup);
        assert_eq!(env.get("HOME"), Some("/var/lib/builder"));
    }

    #[test]
    fn inherited_home_beats_os_home_dir() {
        let lookup = MockEnv::new()
            .with_var("HOME", "/home/ci")
            .with_home_dir("/var/lib/builder");

        let env = resolve_environment(None, &lookup);
        assert_eq!(env.get("HOME"), Some("/home/ci"));
    }

    #[test]
    fn missing_fallbacks_are_omitted_not_empty() {
        let lookup = MockEnv::new().with_var("KUBECONFIG", "");

        let env = resolve_environment(None, &lookup);
        assert!(env.is_empty(), "got {env}");
    }

    #[test]
    fn empty_override_value_is_kept_verbatim() {
        let lookup = MockEnv::new().with_var("KUBECONFIG", "/etc/kube/config");
        let ov = overrides(&[("KUBECONFIG", "")]);

        let env = resolve_environment(Some(&ov), &lookup);
        assert_eq!(env.get("KUBECONFIG"), Some(""));
    }

    #[cfg(unix)]
    #[test]
    fn non_unicode_inherited_value_is_dropped_with_warning() {
        use std::ffi::OsString;
        use std::io;
        use std::os::unix::ffi::OsStringExt;
        use std::sync::{Arc, Mutex};

        #[derive(Clone, Default)]
        struct Captured(Arc<Mutex<Vec<u8>>>);

        impl io::Write for Captured {
            fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
                self.0.lock().unwrap().extend_from_slice(buf);
                Ok(buf.len())
            }

            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        let raw = OsString::from_vec(b"/opt/\xffbin".to_vec());
        let value = tracing::subscriber::with_default(subscriber, || {
            unicode_value("PATH", Err(VarError::NotUnicode(raw)))
        });

        assert_eq!(value, None);
        let logs = String::from_utf8_lossy(&captured.0.lock().unwrap()).into_owned();
        assert!(logs.contains("WARN"), "logs were: {logs}");
        assert!(logs.contains("PATH"), "logs were: {logs}");
    }

    #[test]
    fn unicode_and_missing_values_pass_through() {
        assert_eq!(
            unicode_value("PATH", Ok("/usr/bin".to_string())),
            Some("/usr/bin".to_string())
        );
        assert_eq!(unicode_value("PATH", Err(VarError::NotPresent)), None);
    }

    #[test]
    fn display_is_sorted_and_braced() {
        let ov = overrides(&[("B", "2"), ("A", "1")]);
        let env = resolve_environment(Some(&ov), &MockEnv::new());
        assert_eq!(env.to_string(), "{A=1, B=2}");
    }
}

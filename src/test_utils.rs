//! Test utilities
//!
//! Proptest generators and recording fakes for the collaborator traits.

#[cfg(test)]
pub mod generators {
    use proptest::prelude::*;

    /// Generate a dated release tag like `2024.12.16`
    pub fn release_tag() -> impl Strategy<Value = String> {
        (2018u32..2100, 1u32..13, 1u32..29)
            .prop_map(|(year, month, day)| format!("{year}.{month:02}.{day:02}"))
    }

    /// Generate a directory name for the checkout
    pub fn checkout_dir_name() -> impl Strategy<Value = String> {
        "[a-z][a-z0-9_-]{0,15}"
    }
}

#[cfg(test)]
pub mod fakes {
    use std::cell::RefCell;
    use std::path::{Path, PathBuf};
    use std::rc::Rc;

    use crate::infra::git::{CheckoutHandle, GitError, VersionControlClient};
    use crate::infra::probe::EnvironmentProbe;
    use crate::infra::process::{ProcessCommand, ProcessError, ProcessRunner};

    /// A collaborator call observed by a fake
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum Call {
        Clone { url: String, dest: PathBuf },
        Open { dest: PathBuf },
        Fetch { path: PathBuf },
        Checkout { path: PathBuf, tag: String },
        Run(ProcessCommand),
    }

    /// Shared, ordered record of calls across all fakes
    #[derive(Debug, Clone, Default)]
    pub struct CallLog(Rc<RefCell<Vec<Call>>>);

    impl CallLog {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn push(&self, call: Call) {
            self.0.borrow_mut().push(call);
        }

        pub fn calls(&self) -> Vec<Call> {
            self.0.borrow().clone()
        }

        pub fn is_empty(&self) -> bool {
            self.0.borrow().is_empty()
        }
    }

    /// Version control fake; clone creates the destination directory
    #[derive(Debug, Clone, Default)]
    pub struct FakeVcs {
        pub log: CallLog,
        pub fail_fetch: bool,
        pub fail_checkout: bool,
    }

    impl FakeVcs {
        pub fn new(log: &CallLog) -> Self {
            Self {
                log: log.clone(),
                ..Self::default()
            }
        }
    }

    impl VersionControlClient for FakeVcs {
        fn clone_from(&self, url: &str, dest: &Path) -> Result<CheckoutHandle, GitError> {
            self.log.push(Call::Clone {
                url: url.to_string(),
                dest: dest.to_path_buf(),
            });
            std::fs::create_dir_all(dest).map_err(|e| GitError::CloneFailed {
                url: url.to_string(),
                error: e.to_string(),
            })?;
            Ok(CheckoutHandle::new(dest))
        }

        fn open_existing(&self, dest: &Path) -> Result<CheckoutHandle, GitError> {
            self.log.push(Call::Open {
                dest: dest.to_path_buf(),
            });
            Ok(CheckoutHandle::new(dest))
        }

        fn fetch_origin(&self, handle: &CheckoutHandle) -> Result<(), GitError> {
            self.log.push(Call::Fetch {
                path: handle.path.clone(),
            });
            if self.fail_fetch {
                return Err(GitError::FetchFailed {
                    path: handle.path.clone(),
                    error: "connection refused".to_string(),
                });
            }
            Ok(())
        }

        fn checkout_ref(&self, handle: &CheckoutHandle, tag: &str) -> Result<(), GitError> {
            self.log.push(Call::Checkout {
                path: handle.path.clone(),
                tag: tag.to_string(),
            });
            if self.fail_checkout {
                return Err(GitError::RefNotFound {
                    repo: handle.path.display().to_string(),
                    reference: tag.to_string(),
                });
            }
            Ok(())
        }
    }

    /// Process runner fake; optionally fails or creates a file on success
    #[derive(Debug, Clone, Default)]
    pub struct FakeRunner {
        pub log: CallLog,
        pub fail: bool,
        pub creates: Option<PathBuf>,
    }

    impl FakeRunner {
        pub fn new(log: &CallLog) -> Self {
            Self {
                log: log.clone(),
                ..Self::default()
            }
        }

        /// Runner whose first successful run writes `path`, like a bootstrap
        pub fn creating(log: &CallLog, path: impl Into<PathBuf>) -> Self {
            Self {
                creates: Some(path.into()),
                ..Self::new(log)
            }
        }

        pub fn failing(log: &CallLog) -> Self {
            Self {
                fail: true,
                ..Self::new(log)
            }
        }
    }

    impl ProcessRunner for FakeRunner {
        fn run(&self, command: &ProcessCommand) -> Result<(), ProcessError> {
            self.log.push(Call::Run(command.clone()));
            if self.fail {
                return Err(ProcessError::NonZeroExit {
                    command: command.command_line(),
                    code: Some(1),
                });
            }
            if let Some(path) = &self.creates {
                if let Some(parent) = path.parent() {
                    std::fs::create_dir_all(parent).expect("Failed to create parent directories");
                }
                std::fs::write(path, "").expect("Failed to write file");
            }
            Ok(())
        }
    }

    /// Probe fake with fixed answers
    #[derive(Debug, Clone, Copy, Default)]
    pub struct FakeProbe {
        pub windows: bool,
        pub on_path: bool,
    }

    impl EnvironmentProbe for FakeProbe {
        fn is_windows_host(&self) -> bool {
            self.windows
        }

        fn command_exists_on_path(&self, _name: &str) -> bool {
            self.on_path
        }
    }
}

#[cfg(test)]
mod tests {
    use super::generators::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(crate::config::defaults::MIN_PROPTEST_ITERATIONS))]

        #[test]
        fn test_release_tag_generator(tag in release_tag()) {
            let parts: Vec<&str> = tag.split('.').collect();
            prop_assert_eq!(parts.len(), 3);
            prop_assert_eq!(parts[0].len(), 4);
            prop_assert_eq!(parts[1].len(), 2);
            prop_assert_eq!(parts[2].len(), 2);
        }

        #[test]
        fn test_checkout_dir_name_generator(name in checkout_dir_name()) {
            prop_assert!(!name.is_empty());
            prop_assert!(!name.contains('/'));
        }
    }
}

pub mod console;
pub mod error;
pub mod game;
pub mod model;

pub use error::{GameError, Result};

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::{Path, PathBuf};
    use std::sync::Once;
    use test_context::TestContext;
    use uuid::Uuid;

    static INIT_LOGGER: Once = Once::new();

    pub struct UsingLogger;

    impl TestContext for UsingLogger {
        fn setup() -> UsingLogger {
            INIT_LOGGER.call_once(|| {
                let _ = env_logger::builder().is_test(true).try_init();
            });
            UsingLogger
        }

        fn teardown(self) {}
    }

    /// A fresh directory under the system temp dir, removed after the test.
    pub struct ScratchDir {
        path: PathBuf,
    }

    impl ScratchDir {
        pub fn path(&self) -> &Path {
            &self.path
        }
    }

    impl TestContext for ScratchDir {
        fn setup() -> ScratchDir {
            let path = std::env::temp_dir().join(format!("numguess-{}", Uuid::new_v4()));
            fs::create_dir_all(&path).unwrap();
            ScratchDir { path }
        }

        fn teardown(self) {
            let _ = fs::remove_dir_all(&self.path);
        }
    }
}

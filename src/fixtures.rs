#[cfg(test)]
pub mod test {
    use std::fs;
    use std::path::PathBuf;

    use tempfile::TempDir;

    use crate::builder::Metaconf;
    use crate::resolve::Resolver;

    /// A metaconfig project laid out in a temp directory: root documents at
    /// the top, importable fragments under `metaconfig/`.
    pub struct Tree {
        dir: TempDir,
    }

    impl Tree {
        pub fn new() -> Self {
            let dir = TempDir::new().unwrap();
            fs::create_dir(dir.path().join("metaconfig")).unwrap();
            Self { dir }
        }

        pub fn imports_dir(&self) -> PathBuf {
            self.dir.path().join("metaconfig")
        }

        /// Write an importable fragment as `metaconfig/<name>.mconf`.
        pub fn fragment(&self, name: &str, content: &str) -> PathBuf {
            let path = self.imports_dir().join(format!("{name}.mconf"));
            fs::write(&path, content).unwrap();
            path
        }

        /// Write an importable fragment with no extension.
        pub fn bare_fragment(&self, name: &str, content: &str) -> PathBuf {
            let path = self.imports_dir().join(name);
            fs::write(&path, content).unwrap();
            path
        }

        /// Write a root document beside the imports directory.
        pub fn root(&self, name: &str, content: &str) -> PathBuf {
            let path = self.dir.path().join(name);
            fs::write(&path, content).unwrap();
            path
        }

        pub fn resolver(&self) -> Resolver {
            Resolver::new(self.imports_dir())
        }

        pub fn metaconf(&self) -> Metaconf {
            Metaconf::builder()
                .imports_dir(self.imports_dir())
                .build()
                .unwrap()
        }
    }
}

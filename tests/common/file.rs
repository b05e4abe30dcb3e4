use derive_new::new;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Eq, PartialEq, new)]
pub struct FileSpec {
    pub path: PathBuf,
    pub content: String,
}

pub fn write_file(file_spec: FileSpec) {
    // make sure the parent directory exists
    if let Some(parent) = file_spec.path.parent() {
        std::fs::create_dir_all(parent)
            .unwrap_or_else(|e| panic!("Failed to create directory {:?}: {}", parent, e));
    }

    std::fs::write(&file_spec.path, &file_spec.content)
        .unwrap_or_else(|e| panic!("Failed to write file {:?}: {}", file_spec.path, e));
}

/// Write `count` files of random words under `dir`, named `0.txt`, `1.txt`, ...
pub fn write_generated_files(dir: &Path, count: usize) -> Vec<FileSpec> {
    use fake::{Fake, faker::lorem::en::Words};

    (0..count)
        .map(|i| {
            let content = Words(5..10)
                .fake::<Vec<String>>()
                .into_iter()
                .map(|word| format!("{}\n", word))
                .collect::<String>();

            let file_spec = FileSpec::new(dir.join(format!("{}.txt", i)), content);
            write_file(file_spec.clone());

            file_spec
        })
        .collect::<Vec<_>>()
}

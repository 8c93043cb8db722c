//! Error taxonomy of the conversion pipeline.

use std::io;

use thiserror::Error;

/// Everything that can go wrong converting one file. The batch driver
/// reports these per file and moves on; none of them ends the process.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// The input path does not name a regular file. Nothing was created.
    #[error("file '{path}' does not exist")]
    FileNotFound { path: String },

    /// An encoding label the registry does not know.
    #[error("unknown encoding '{label}'")]
    UnknownEncoding { label: String },

    /// The input file could not be opened.
    #[error("error opening {path}: {source}")]
    OpenInput { path: String, source: io::Error },

    /// The temporary output file could not be created.
    #[error("error opening {path}: {source}")]
    OpenOutput { path: String, source: io::Error },

    /// Input bytes the source encoding cannot decode.
    #[error("cannot decode {path} as {encoding}")]
    Decode { path: String, encoding: String },

    /// A character the target encoding cannot represent.
    #[error("cannot encode converted text of {path} as {encoding}")]
    Encode { path: String, encoding: String },

    /// Mid-stream read or write failure. The transaction was rolled back.
    #[error("i/o error on {path}: {source}")]
    Io { path: String, source: io::Error },

    /// The commit step failed; the source file is untouched.
    #[error("failed to rename {from} to {to}: {source}")]
    Rename {
        from: String,
        to: String,
        source: io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_paths() {
        let e = ConvertError::FileNotFound {
            path: "a.txt".to_owned(),
        };
        assert_eq!(e.to_string(), "file 'a.txt' does not exist");

        let e = ConvertError::UnknownEncoding {
            label: "klingon".to_owned(),
        };
        assert_eq!(e.to_string(), "unknown encoding 'klingon'");

        let e = ConvertError::Decode {
            path: "a.txt".to_owned(),
            encoding: "UTF-8".to_owned(),
        };
        assert_eq!(e.to_string(), "cannot decode a.txt as UTF-8");

        let e = ConvertError::Rename {
            from: "a.txt.utf-8".to_owned(),
            to: "a.txt".to_owned(),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        let msg = e.to_string();
        assert!(msg.starts_with("failed to rename a.txt.utf-8 to a.txt:"), "message was: {}", msg);
    }

    #[test]
    fn open_errors_are_distinguishable() {
        let on_input = ConvertError::OpenInput {
            path: "in.txt".to_owned(),
            source: io::Error::from(io::ErrorKind::NotFound),
        };
        let on_output = ConvertError::OpenOutput {
            path: "in.txt.utf-8".to_owned(),
            source: io::Error::from(io::ErrorKind::PermissionDenied),
        };
        assert!(matches!(on_input, ConvertError::OpenInput { .. }));
        assert!(matches!(on_output, ConvertError::OpenOutput { .. }));
    }
}

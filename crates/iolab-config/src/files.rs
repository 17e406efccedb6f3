//! Default file names used by the demos.

use serde::{Deserialize, Serialize};

fn default_log() -> String {
    String::from("log.txt")
}

fn default_record() -> String {
    String::from("data")
}

fn default_shared() -> String {
    String::from("shared_data.txt")
}

fn default_vectored() -> String {
    String::from("iovec_test.txt")
}

fn default_zerocopy() -> String {
    String::from("zerocopy_test.txt")
}

fn default_zerocopy_output() -> String {
    String::from("zerocopy_output.txt")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FilesConfig {
    /// Append target for `iolab append`.
    #[serde(default = "default_log")]
    pub log: String,

    /// Binary record file for `iolab record` and `iolab eof`.
    #[serde(default = "default_record")]
    pub record: String,

    /// Shared stream for `iolab stream-lock`.
    #[serde(default = "default_shared")]
    pub shared: String,

    /// Scatter/gather target for `iolab vectored`.
    #[serde(default = "default_vectored")]
    pub vectored: String,

    /// Mapped file for `iolab zerocopy`.
    #[serde(default = "default_zerocopy")]
    pub zerocopy: String,

    /// `sendfile` destination for `iolab zerocopy`.
    #[serde(default = "default_zerocopy_output")]
    pub zerocopy_output: String,
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            log: default_log(),
            record: default_record(),
            shared: default_shared(),
            vectored: default_vectored(),
            zerocopy: default_zerocopy(),
            zerocopy_output: default_zerocopy_output(),
        }
    }
}

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HostsError {
    #[error("could not read hosts file {path}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("hosts file {0} is empty")]
    EmptyFile(PathBuf),
    #[error("can't parse hosts string, no hosts found")]
    EmptyString,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum DispatchError {
    #[error("refusing to dispatch to an empty host list")]
    NoHosts,
}

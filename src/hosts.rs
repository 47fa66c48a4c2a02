use crate::error::HostsError;
use log::debug;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

/// Reads a newline-delimited host list. Blank lines and `#` comments are skipped.
pub fn parse_host_file(path: &Path) -> Result<Vec<String>, HostsError> {
    debug!("Parsing hosts file: {}", path.display());

    let file = File::open(path).map_err(|source| HostsError::Unreadable {
        path: path.to_path_buf(),
        source,
    })?;

    let hosts = read_hosts(file).map_err(|source| HostsError::Unreadable {
        path: path.to_path_buf(),
        source,
    })?;

    if hosts.is_empty() {
        return Err(HostsError::EmptyFile(path.to_path_buf()));
    }

    Ok(hosts)
}

pub fn read_hosts<R: Read>(reader: R) -> std::io::Result<Vec<String>> {
    let mut hosts = Vec::new();

    for line in BufReader::new(reader).lines() {
        let line = line?;
        let host = line.trim();
        if host.is_empty() || host.starts_with('#') {
            continue;
        }
        hosts.push(host.to_string());
    }

    Ok(hosts)
}

pub fn parse_host_string(hosts: &str) -> Result<Vec<String>, HostsError> {
    let hosts: Vec<String> = hosts.split_whitespace().map(String::from).collect();

    if hosts.is_empty() {
        return Err(HostsError::EmptyString);
    }

    Ok(hosts)
}

/// One remote command bound to one host.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Task {
    id: usize,
    host: String,
    argv: Vec<String>,
}

impl Task {
    pub fn new(id: usize, host: &str, argv: &[String]) -> Self {
        Task {
            id,
            host: host.to_string(),
            argv: argv.to_vec(),
        }
    }

    /// Builds one task per host, numbered by position.
    pub fn from_hosts(hosts: &[String], argv: &[String]) -> Vec<Task> {
        hosts
            .iter()
            .enumerate()
            .map(|(id, host)| Task::new(id, host, argv))
            .collect()
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn argv(&self) -> &[String] {
        &self.argv
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hosts_keeps_order_and_duplicates() {
        let hosts: Vec<String> = ["a", "b", "a"].into_iter().map(String::from).collect();
        let argv = vec![String::from("uptime")];

        let tasks = Task::from_hosts(&hosts, &argv);

        assert_eq!(tasks.len(), 3);
        for (i, task) in tasks.iter().enumerate() {
            assert_eq!(task.id(), i);
            assert_eq!(task.host(), hosts[i]);
            assert_eq!(task.argv(), argv.as_slice());
        }
    }

    #[test]
    fn test_from_hosts_empty() {
        assert!(Task::from_hosts(&[], &[]).is_empty());
    }
}

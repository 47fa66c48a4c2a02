/// Assembles the arguments passed to the remote-execution program after the host:
/// `(-l user)? (-o option)* command`.
pub fn remote_args(command: &str, user: Option<&str>, options: &[String]) -> Vec<String> {
    let mut args = Vec::with_capacity(options.len() * 2 + 3);

    if let Some(user) = user.filter(|u| !u.is_empty()) {
        args.push(String::from("-l"));
        args.push(user.to_string());
    }

    for option in options {
        args.push(String::from("-o"));
        args.push(option.clone());
    }

    args.push(command.to_string());
    args
}

pub fn split_options(options: &str) -> Vec<String> {
    options.split_whitespace().map(String::from).collect()
}

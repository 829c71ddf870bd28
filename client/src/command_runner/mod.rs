use crate::dfs_client::DfsClient;
use utilities::result::Result;

const HELP: &str = "
put <local_file> <remote_dir> <file_name>
get <remote_dir> <file_name> <local_file>
mkdir <remote_dir>
stat <remote_dir> <file_name>
list <remote_dir>
rename <src> <dest>        (src ending in '/' renames a directory)
deletepath <remote_dir>
deletefile <remote_dir> <file_name>
help
";

pub struct CommandRunner {
    client: DfsClient,
}

fn args<'a>(command: &'a str, name: &str, count: usize) -> Result<Vec<&'a str>> {
    let inputs: Vec<&str> = command.split_whitespace().skip(1).collect();
    if inputs.len() < count {
        return Err(format!("Invalid {name} command usage please use <help> to get help").into());
    }
    Ok(inputs)
}

impl CommandRunner {
    pub fn new(client: DfsClient) -> Self {
        CommandRunner { client }
    }
    pub async fn handle_input(&mut self, command: &str) -> Result<String> {
        let command = command.trim();
        let word = command.split_whitespace().next().unwrap_or_default();
        match word {
            "put" => {
                let inputs = args(command, "put", 3)?;
                let report = self.client.put(inputs[0], inputs[1], inputs[2]).await?;
                Ok(format!(
                    "true ({} bytes in {} blocks, {} under replicated)",
                    report.file_size, report.blocks, report.under_replicated
                ))
            }
            "get" => {
                let inputs = args(command, "get", 3)?;
                let written = self.client.get(inputs[0], inputs[1], inputs[2]).await?;
                Ok(format!("true ({written} bytes)"))
            }
            "mkdir" => {
                let inputs = args(command, "mkdir", 1)?;
                let nodes = self.client.mkdir(inputs[0]).await?;
                Ok(format!("true (created on {nodes} nodes)"))
            }
            "stat" => {
                let inputs = args(command, "stat", 2)?;
                let size = self.client.stat(inputs[0], inputs[1]).await?;
                Ok(format!("{} {size}", inputs[1]))
            }
            "list" => {
                let inputs = args(command, "list", 1)?;
                let entries = self.client.list(inputs[0]).await?;
                Ok(entries
                    .iter()
                    .map(|(name, size)| format!("\n{name} {size}"))
                    .collect())
            }
            "rename" => {
                let inputs = args(command, "rename", 2)?;
                let moved = self.client.rename(inputs[0], inputs[1]).await?;
                Ok(format!("true ({moved} files)"))
            }
            "deletepath" => {
                let inputs = args(command, "deletepath", 1)?;
                let removed = self.client.delete_path(inputs[0]).await?;
                Ok(format!("true ({removed} files)"))
            }
            "deletefile" => {
                let inputs = args(command, "deletefile", 2)?;
                let present = self.client.delete_file(inputs[0], inputs[1]).await?;
                Ok(present.to_string())
            }
            "help" => Ok(HELP.to_owned()),
            _ => Err(
                "Invalid Command Please use valid command use :help to list available commands"
                    .into(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DeleteMode;
    use utilities::grpc_channel_pool::ChannelSettings;

    fn runner() -> CommandRunner {
        // never dialed by these tests
        let client = DfsClient::new(
            "http://127.0.0.1:1",
            ChannelSettings::default(),
            DeleteMode::Strict,
        );
        CommandRunner::new(client)
    }

    #[tokio::test]
    async fn help_lists_every_command() {
        let help = runner().handle_input("help\n").await.unwrap();
        for command in ["put", "get", "mkdir", "stat", "list", "rename", "deletepath", "deletefile"] {
            assert!(help.contains(command), "missing {command}");
        }
    }

    #[tokio::test]
    async fn missing_arguments_are_rejected_before_any_call() {
        let err = runner().handle_input("put only_local").await.unwrap_err();
        assert!(err.to_string().contains("put"));
        assert!(runner().handle_input("rename a/").await.is_err());
    }

    #[tokio::test]
    async fn unknown_commands_are_rejected() {
        assert!(runner().handle_input("fetch x y").await.is_err());
        assert!(runner().handle_input("").await.is_err());
    }
}

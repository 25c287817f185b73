/// Bot commands recognized in inbound text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Start,
    /// `/temp [value]`; the raw value is validated by the handler.
    Temp { value: Option<String> },
    New,
    Delete { logs: bool },
    Private { message: String },
    /// `iterations` is 0 when missing or not a number.
    BotTalk { iterations: u32, message: String },
    Translate { target: Option<String> },
    Add { user: Option<String> },
    Remove { user: Option<String> },
    List,
    Unknown { name: String },
}

impl Command {
    pub fn name(&self) -> &str {
        match self {
            Self::Start => "start",
            Self::Temp { .. } => "temp",
            Self::New => "new",
            Self::Delete { .. } => "delete",
            Self::Private { .. } => "private",
            Self::BotTalk { .. } => "bottalk",
            Self::Translate { .. } => "translate",
            Self::Add { .. } => "add",
            Self::Remove { .. } => "remove",
            Self::List => "list",
            Self::Unknown { name } => name,
        }
    }
}

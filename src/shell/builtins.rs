use indoc::indoc;

/// Every command the interpreter dispatches, in `help` order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Builtin {
    Help,
    About,
    Skills,
    Projects,
    Contact,
    Clear,
    Whoami,
    Ls,
    Ll,
    Cat,
    Pwd,
    Cd,
    Mkdir,
    Touch,
    Rm,
    History,
    Date,
    Uptime,
    Ps,
    Top,
    Df,
    Free,
    Uname,
}

impl Builtin {
    pub const ALL: [Builtin; 23] = [
        Builtin::Help,
        Builtin::About,
        Builtin::Skills,
        Builtin::Projects,
        Builtin::Contact,
        Builtin::Clear,
        Builtin::Whoami,
        Builtin::Ls,
        Builtin::Ll,
        Builtin::Cat,
        Builtin::Pwd,
        Builtin::Cd,
        Builtin::Mkdir,
        Builtin::Touch,
        Builtin::Rm,
        Builtin::History,
        Builtin::Date,
        Builtin::Uptime,
        Builtin::Ps,
        Builtin::Top,
        Builtin::Df,
        Builtin::Free,
        Builtin::Uname,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Builtin::Help => "help",
            Builtin::About => "about",
            Builtin::Skills => "skills",
            Builtin::Projects => "projects",
            Builtin::Contact => "contact",
            Builtin::Clear => "clear",
            Builtin::Whoami => "whoami",
            Builtin::Ls => "ls",
            Builtin::Ll => "ll",
            Builtin::Cat => "cat",
            Builtin::Pwd => "pwd",
            Builtin::Cd => "cd",
            Builtin::Mkdir => "mkdir",
            Builtin::Touch => "touch",
            Builtin::Rm => "rm",
            Builtin::History => "history",
            Builtin::Date => "date",
            Builtin::Uptime => "uptime",
            Builtin::Ps => "ps",
            Builtin::Top => "top",
            Builtin::Df => "df",
            Builtin::Free => "free",
            Builtin::Uname => "uname",
        }
    }

    pub fn summary(self) -> &'static str {
        match self {
            Builtin::Help => "Show this help",
            Builtin::About => "Display information about me",
            Builtin::Skills => "List my technical skills",
            Builtin::Projects => "Show my projects",
            Builtin::Contact => "Display contact information",
            Builtin::Clear => "Clear the terminal",
            Builtin::Whoami => "Display current user",
            Builtin::Ls => "List directory contents",
            Builtin::Ll => "List directory contents (detailed)",
            Builtin::Cat => "Display file contents",
            Builtin::Pwd => "Print working directory",
            Builtin::Cd => "Change directory",
            Builtin::Mkdir => "Create directory",
            Builtin::Touch => "Create file",
            Builtin::Rm => "Remove file or directory",
            Builtin::History => "Show command history",
            Builtin::Date => "Show current date and time",
            Builtin::Uptime => "Show system uptime",
            Builtin::Ps => "Show running processes",
            Builtin::Top => "Show system processes",
            Builtin::Df => "Show disk usage",
            Builtin::Free => "Show memory usage",
            Builtin::Uname => "Show system information",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|builtin| builtin.name() == name)
    }

    /// Builtins whose name starts with `prefix`, in dispatch order.
    pub fn completions(prefix: &str) -> Vec<Builtin> {
        Self::ALL
            .into_iter()
            .filter(|builtin| builtin.name().starts_with(prefix))
            .collect()
    }
}

pub(super) const UPTIME: &str = "System uptime: 42 days, 13 hours, 37 minutes";

// Every row starts indented, so indoc would strip the alignment.
pub(super) const PS: &str = concat!(
    "  PID TTY          TIME CMD\n",
    " 1234 pts/0    00:00:01 bash\n",
    " 5678 pts/0    00:00:00 portfolio\n",
    " 9012 pts/0    00:00:00 ps",
);

pub(super) const TOP: &str = indoc! {"
    Tasks: 156 total,   1 running, 155 sleeping
    CPU usage: 12.5% user, 3.2% system, 84.3% idle
    Memory: 8192MB total, 4096MB used, 4096MB free

      PID USER      PR  NI    VIRT    RES    SHR S  %CPU %MEM     TIME+ COMMAND
     1234 developer 20   0  123456  45678  12345 S   5.2  2.1   0:12.34 portfolio
     5678 developer 20   0   98765  32109   8765 S   2.1  1.5   0:05.67 firefox"};

pub(super) const DF: &str = indoc! {"
    Filesystem     1K-blocks    Used Available Use% Mounted on
    /dev/sda1       20971520 8388608  12582912  40% /
    /dev/sda2        2097152  524288   1572864  25% /home
    tmpfs            4194304       0   4194304   0% /tmp"};

pub(super) const FREE: &str = indoc! {"
                  total        used        free      shared  buff/cache   available
    Mem:        8388608     4194304     2097152      524288     2097152     3670016
    Swap:       2097152           0     2097152"};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip_through_from_name() {
        for builtin in Builtin::ALL {
            assert_eq!(Builtin::from_name(builtin.name()), Some(builtin));
        }
        assert_eq!(Builtin::from_name("sudo"), None);
    }

    #[test]
    fn completions_keep_dispatch_order() {
        assert_eq!(
            Builtin::completions("c"),
            vec![Builtin::Contact, Builtin::Clear, Builtin::Cat, Builtin::Cd]
        );
        assert_eq!(Builtin::completions("hist"), vec![Builtin::History]);
        assert!(Builtin::completions("zz").is_empty());
    }

    #[test]
    fn static_tables_keep_their_column_indent() {
        assert!(PS.starts_with("  PID TTY"));
        assert!(FREE.starts_with("              total"));
        assert_eq!(TOP.lines().count(), 7);
    }
}

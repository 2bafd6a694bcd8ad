//! The terminal's command language: state, dispatch and builtins.
//!
//! `CommandInterpreter::execute` never fails. Every error a command can hit
//! is rendered as an output line, the way a shell prints to stderr.

mod builtins;
pub mod session;

pub use builtins::Builtin;
pub use session::{SessionKey, TerminalSession};

use chrono::Local;

use crate::apps::AppKind;
use crate::config::DesktopConfig;
use crate::constants::{DEFAULT_HOSTNAME, DEFAULT_USER, INITIAL_CWD};
use crate::fs::{
    FsError, ListError, Mutation, Node, StaticEntry, VirtualFileSystemView, join_segments,
};
use crate::repository::{
    ProjectRecord, REPOSITORIES, RepositoryError, USER_PROFILE, UserProfile, fetch_all,
};

/// Size shown by `ll` for every directory.
const DIRECTORY_SIZE: usize = 4096;
const LL_DATE: &str = "Dec 15 10:30";

/// Per-terminal state: where the shell is and what it has run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandState {
    current_path: String,
    history: Vec<String>,
    /// Steps back from the newest history entry; `None` when not recalling.
    history_cursor: Option<usize>,
}

/// Result of a history recall key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recall<'a> {
    /// Replace the input line with this entry.
    Line(&'a str),
    /// Stepped past the newest entry; empty the input line.
    Clear,
    /// Nothing to step to; leave the input alone.
    Stay,
}

impl CommandState {
    pub fn new(current_path: impl Into<String>) -> Self {
        Self {
            current_path: current_path.into(),
            history: Vec::new(),
            history_cursor: None,
        }
    }

    pub fn current_path(&self) -> &str {
        &self.current_path
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }

    pub fn history_cursor(&self) -> Option<usize> {
        self.history_cursor
    }

    fn record(&mut self, line: &str) {
        self.history.push(line.to_string());
        self.history_cursor = None;
    }

    /// Step to the next older entry, stopping at the oldest.
    pub fn recall_previous(&mut self) -> Recall<'_> {
        let next = self.history_cursor.map_or(0, |cursor| cursor + 1);
        if next >= self.history.len() {
            return Recall::Stay;
        }
        self.history_cursor = Some(next);
        Recall::Line(&self.history[self.history.len() - 1 - next])
    }

    /// Step to the next newer entry; past the newest the input clears.
    pub fn recall_next(&mut self) -> Recall<'_> {
        match self.history_cursor {
            None => Recall::Stay,
            Some(0) => {
                self.history_cursor = None;
                Recall::Clear
            }
            Some(cursor) => {
                let cursor = cursor - 1;
                self.history_cursor = Some(cursor);
                Recall::Line(&self.history[self.history.len() - 1 - cursor])
            }
        }
    }

    pub fn reset_recall(&mut self) {
        self.history_cursor = None;
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Output {
    pub lines: Vec<String>,
    /// Set by `clear`: the session should drop its scrollback.
    pub clear_screen: bool,
}

impl Output {
    fn lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
            clear_screen: false,
        }
    }

    fn line(line: impl Into<String>) -> Self {
        Self::lines([line.into()])
    }

    fn text(text: &str) -> Self {
        Self::lines(text.lines())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandInterpreter {
    user: String,
    hostname: String,
    initial_dir: String,
}

impl Default for CommandInterpreter {
    fn default() -> Self {
        Self::new(DEFAULT_USER, DEFAULT_HOSTNAME, INITIAL_CWD)
    }
}

impl CommandInterpreter {
    pub fn new(
        user: impl Into<String>,
        hostname: impl Into<String>,
        initial_dir: impl Into<String>,
    ) -> Self {
        Self {
            user: user.into(),
            hostname: hostname.into(),
            initial_dir: initial_dir.into(),
        }
    }

    pub fn from_config(config: &DesktopConfig) -> Self {
        Self::new(&config.user, &config.hostname, &config.initial_dir)
    }

    pub fn initial_dir(&self) -> &str {
        &self.initial_dir
    }

    /// A fresh state rooted at the initial directory.
    pub fn new_state(&self) -> CommandState {
        CommandState::new(self.initial_dir.clone())
    }

    pub fn prompt(&self, state: &CommandState, fs: &VirtualFileSystemView) -> String {
        format!(
            "{}@{}:{}$ ",
            self.user,
            self.hostname,
            fs.resolver().display(state.current_path())
        )
    }

    /// Run one input line. Non-empty lines are recorded in history before
    /// dispatch, whether or not the command exists.
    pub async fn execute(
        &self,
        line: &str,
        state: &mut CommandState,
        fs: &mut VirtualFileSystemView,
    ) -> Output {
        let line = line.trim();
        if line.is_empty() {
            state.reset_recall();
            return Output::default();
        }
        state.record(line);

        let mut words = line.split_whitespace();
        let command = words.next().unwrap_or_default();
        let args: Vec<&str> = words.collect();
        let Some(builtin) = Builtin::from_name(command) else {
            tracing::debug!(command, "unknown command");
            return Output::line(format!("bash: {command}: command not found"));
        };
        tracing::debug!(command, ?args, "dispatch");
        self.dispatch(builtin, &args, state, fs).await
    }

    async fn dispatch(
        &self,
        builtin: Builtin,
        args: &[&str],
        state: &mut CommandState,
        fs: &mut VirtualFileSystemView,
    ) -> Output {
        let operand = args.first().copied();
        match builtin {
            Builtin::Help => help(),
            Builtin::About => self.about(fs).await,
            Builtin::Skills => self.skills(fs).await,
            Builtin::Projects => self.projects(fs).await,
            Builtin::Contact => self.contact(fs).await,
            Builtin::Clear => Output {
                lines: Vec::new(),
                clear_screen: true,
            },
            Builtin::Whoami => Output::line(self.user.clone()),
            Builtin::Pwd => Output::line(fs.resolver().display(state.current_path())),
            Builtin::Cd => self.cd(operand, state, fs).await,
            Builtin::Ls => list(operand, state, fs).await,
            Builtin::Ll => self.long_list(operand, state, fs).await,
            Builtin::Cat => cat(operand, state, fs).await,
            Builtin::Mkdir => create(operand, state, fs, Creation::Directory).await,
            Builtin::Touch => create(operand, state, fs, Creation::File).await,
            Builtin::Rm => remove(operand, state, fs),
            Builtin::History => Output::lines(
                state
                    .history()
                    .iter()
                    .enumerate()
                    .map(|(idx, cmd)| format!("{}  {cmd}", idx + 1)),
            ),
            Builtin::Date => Output::line(
                Local::now()
                    .format("%a %b %d %Y %H:%M:%S GMT%z")
                    .to_string(),
            ),
            Builtin::Uptime => Output::line(builtins::UPTIME),
            Builtin::Uname => Output::line(format!(
                "Linux {} 6.8.0-45-generic #45-Ubuntu SMP PREEMPT_DYNAMIC x86_64 GNU/Linux",
                self.hostname
            )),
            Builtin::Ps => Output::text(builtins::PS),
            Builtin::Top => Output::text(builtins::TOP),
            Builtin::Df => Output::text(builtins::DF),
            Builtin::Free => Output::text(builtins::FREE),
        }
    }

    async fn cd(
        &self,
        operand: Option<&str>,
        state: &mut CommandState,
        fs: &VirtualFileSystemView,
    ) -> Output {
        let target = match operand {
            None | Some("~") => {
                state.current_path = self.initial_dir.clone();
                return Output::default();
            }
            Some(target) => target,
        };
        let segments = fs.resolver().resolve_from(state.current_path(), target);
        match fs.lookup(&segments).await {
            Ok(entry) if entry.is_folder() => {
                state.current_path = join_segments(&segments);
                Output::default()
            }
            Ok(_) => Output::line(format!("cd: {target}: {}", FsError::NotADirectory)),
            Err(err) => Output::line(format!("cd: {target}: {err}")),
        }
    }

    async fn long_list(
        &self,
        operand: Option<&str>,
        state: &CommandState,
        fs: &VirtualFileSystemView,
    ) -> Output {
        let target = operand.unwrap_or(".");
        let path = fs.resolver().absolutize(state.current_path(), target);
        let entries = match fs.list_directory(&path).await {
            Ok(entries) => entries,
            Err(err) => return Output::line(format!("ll: {target}: {err}")),
        };
        let mut lines = Vec::with_capacity(entries.len() + 1);
        lines.push(format!("total {}", entries.len()));
        for entry in entries {
            let (permissions, size) = if entry.is_folder() {
                ("drwxr-xr-x", DIRECTORY_SIZE)
            } else {
                ("-rw-r--r--", entry.content.as_deref().map_or(0, str::len))
            };
            lines.push(format!(
                "{permissions} 1 {user} {user} {size:>8} {LL_DATE} {name}",
                user = self.user,
                name = entry.name
            ));
        }
        Output::lines(lines)
    }

    /// Body of a content page window. Profile pages share their text with
    /// the matching builtin.
    pub async fn page_lines(&self, app: AppKind, fs: &VirtualFileSystemView) -> Vec<String> {
        let output = match app {
            AppKind::About => self.about(fs).await,
            AppKind::Skills => self.skills(fs).await,
            AppKind::Projects => self.projects(fs).await,
            AppKind::Contact => self.contact(fs).await,
            AppKind::Settings => Output::lines([
                format!("User: {}", self.user),
                format!("Hostname: {}", self.hostname),
                format!("Home: {}", fs.resolver().home()),
            ]),
            other => Output::line(format!("{} has nothing to show here yet.", other.title())),
        };
        output.lines
    }

    async fn profile(&self, fs: &VirtualFileSystemView) -> Result<UserProfile, RepositoryError> {
        let repository = fs.repository();
        let profiles: Vec<UserProfile> = fetch_all(repository.as_ref(), USER_PROFILE).await?;
        Ok(profiles.into_iter().next().unwrap_or_default())
    }

    async fn about(&self, fs: &VirtualFileSystemView) -> Output {
        let about = match self.profile(fs).await {
            Ok(profile) => profile.about,
            Err(err) => return repository_failure("about", err),
        };
        let mut lines = vec![match about.tagline.as_str() {
            "" => about.name.clone(),
            tagline => format!("{} - {tagline}", about.name),
        }];
        for (label, value) in [
            ("Location", &about.location),
            ("Experience", &about.experience),
            ("Specialization", &about.specialization),
            ("Passion", &about.passion),
            ("Education", &about.education),
            ("Certifications", &about.certifications),
        ] {
            if !value.is_empty() {
                lines.push(format!("{label}: {value}"));
            }
        }
        lines.push(String::new());
        Output::lines(lines)
    }

    async fn skills(&self, fs: &VirtualFileSystemView) -> Output {
        let skills = match self.profile(fs).await {
            Ok(profile) => profile.linkedin.skills,
            Err(err) => return repository_failure("skills", err),
        };
        let mut lines = vec!["Technical Skills:".to_string()];
        lines.extend(tree_lines(&skills));
        lines.push(String::new());
        Output::lines(lines)
    }

    async fn projects(&self, fs: &VirtualFileSystemView) -> Output {
        let repository = fs.repository();
        let mut projects: Vec<ProjectRecord> =
            match fetch_all(repository.as_ref(), REPOSITORIES).await {
                Ok(projects) => projects,
                Err(err) => return repository_failure("projects", err),
            };
        // Pinned first; the sort is stable so repository order holds within each group.
        projects.sort_by_key(|project| !project.is_pinned);

        let mut lines = vec!["Recent Projects:".to_string()];
        let count = projects.len();
        for (idx, project) in projects.iter().enumerate() {
            let last = idx + 1 == count;
            let (branch, stem) = if last { ("└──", "    ") } else { ("├──", "│   ") };
            match project.lang.as_str() {
                "" => lines.push(format!("{branch} {}", project.name)),
                lang => lines.push(format!("{branch} {} ({lang})", project.name)),
            }
            if !project.description.is_empty() {
                lines.push(format!("{stem}└── {}", project.description));
            }
        }
        lines.push(String::new());
        Output::lines(lines)
    }

    async fn contact(&self, fs: &VirtualFileSystemView) -> Output {
        let contact = match self.profile(fs).await {
            Ok(profile) => profile.contact,
            Err(err) => return repository_failure("contact", err),
        };
        let mut lines = vec!["Contact Information:".to_string()];
        for (label, value) in [
            ("Email", &contact.email),
            ("Phone", &contact.phone),
            ("GitHub", &contact.github),
            ("LinkedIn", &contact.linkedin),
            ("Website", &contact.website),
            ("Location", &contact.location),
        ] {
            if !value.is_empty() {
                lines.push(format!("{label}: {value}"));
            }
        }
        lines.push(String::new());
        Output::lines(lines)
    }
}

fn help() -> Output {
    let mut lines = vec!["Available commands:".to_string()];
    lines.extend(
        Builtin::ALL
            .iter()
            .map(|builtin| format!("  {:<10}- {}", builtin.name(), builtin.summary())),
    );
    lines.push(String::new());
    Output::lines(lines)
}

fn repository_failure(command: &str, err: RepositoryError) -> Output {
    tracing::warn!(command, %err, "content repository request failed");
    Output::line(format!("{command}: {err}"))
}

fn tree_lines(items: &[String]) -> impl Iterator<Item = String> + '_ {
    items.iter().enumerate().map(move |(idx, item)| {
        let branch = if idx + 1 == items.len() { "└──" } else { "├──" };
        format!("{branch} {item}")
    })
}

async fn list(
    operand: Option<&str>,
    state: &CommandState,
    fs: &VirtualFileSystemView,
) -> Output {
    let target = operand.unwrap_or(".");
    let path = fs.resolver().absolutize(state.current_path(), target);
    match fs.list_directory(&path).await {
        Ok(entries) => Output::lines(entries.into_iter().map(|entry| entry.name)),
        Err(err) => Output::line(format!("ls: {target}: {err}")),
    }
}

async fn cat(operand: Option<&str>, state: &CommandState, fs: &VirtualFileSystemView) -> Output {
    let Some(target) = operand else {
        return Output::line("cat: missing file operand");
    };
    let segments = fs.resolver().resolve_from(state.current_path(), target);
    match fs.lookup(&segments).await {
        Ok(entry) if entry.is_folder() => {
            Output::line(format!("cat: {target}: {}", FsError::IsADirectory))
        }
        Ok(entry) => match (entry.content, entry.url) {
            (Some(content), _) => Output::lines(content.split('\n')),
            (None, Some(url)) => Output::line(url),
            (None, None) => Output::default(),
        },
        Err(err) => Output::line(format!("cat: {target}: {err}")),
    }
}

#[derive(Debug, Clone, Copy)]
enum Creation {
    Directory,
    File,
}

impl Creation {
    fn command(self) -> &'static str {
        match self {
            Creation::Directory => "mkdir",
            Creation::File => "touch",
        }
    }

    fn noun(self) -> &'static str {
        match self {
            Creation::Directory => "directory",
            Creation::File => "file",
        }
    }

    fn missing_operand(self) -> &'static str {
        match self {
            Creation::Directory => "mkdir: missing operand",
            Creation::File => "touch: missing file operand",
        }
    }

    fn entry(self) -> StaticEntry {
        match self {
            Creation::Directory => StaticEntry::Directory,
            Creation::File => StaticEntry::File(String::new()),
        }
    }
}

/// `mkdir`/`touch`: the parent must be a directory, static or from the
/// repository, and must not already hold the name. New entries always land
/// in the static tree, which grows any missing parents.
async fn create(
    operand: Option<&str>,
    state: &CommandState,
    fs: &mut VirtualFileSystemView,
    creation: Creation,
) -> Output {
    let Some(target) = operand else {
        return Output::line(creation.missing_operand());
    };
    let fail = |err: &dyn std::fmt::Display| {
        Output::line(format!(
            "{}: cannot create {} '{target}': {err}",
            creation.command(),
            creation.noun()
        ))
    };
    let segments = fs.resolver().resolve_from(state.current_path(), target);
    let Some((_, parent)) = segments.split_last() else {
        return fail(&FsError::AlreadyExists);
    };
    match fs.lookup(parent).await {
        Ok(entry) if entry.is_folder() => {}
        Ok(_) | Err(ListError::Fs(_)) => return fail(&FsError::NotFound),
        Err(err) => return fail(&err),
    }
    match fs.lookup(&segments).await {
        Ok(_) => return fail(&FsError::AlreadyExists),
        Err(ListError::Fs(_)) => {}
        Err(err) => return fail(&err),
    }
    match fs.mutate(&segments, Mutation::Set(creation.entry())) {
        Ok(()) => Output::default(),
        Err(err) => fail(&err),
    }
}

/// `rm`: the target must exist in the static tree. Directories must be
/// empty; there is no recursive delete. The working directory and its
/// ancestors cannot be removed.
fn remove(operand: Option<&str>, state: &CommandState, fs: &mut VirtualFileSystemView) -> Output {
    let Some(target) = operand else {
        return Output::line("rm: missing operand");
    };
    let fail = |err: FsError| Output::line(format!("rm: cannot remove '{target}': {err}"));
    let segments = fs.resolver().resolve_from(state.current_path(), target);
    if segments.is_empty() {
        return fail(FsError::RootImmutable);
    }
    if fs.resolver().resolve(state.current_path()).starts_with(&segments) {
        return fail(FsError::InvalidArgument);
    }
    match fs.get_entry(&segments) {
        Ok(Node::Directory(children)) if !children.is_empty() => {
            return fail(FsError::DirectoryNotEmpty);
        }
        Ok(_) => {}
        Err(_) => return fail(FsError::NotFound),
    }
    match fs.mutate(&segments, Mutation::Remove) {
        Ok(()) => Output::default(),
        Err(err) => fail(err),
    }
}

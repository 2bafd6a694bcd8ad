use std::sync::Arc;

use portfolio_desk::fs::{PathResolver, VirtualFileSystemView};
use portfolio_desk::repository::InMemoryRepository;
use portfolio_desk::shell::{CommandInterpreter, CommandState};

struct Shell {
    interpreter: CommandInterpreter,
    state: CommandState,
    fs: VirtualFileSystemView,
}

impl Shell {
    fn new(repository: InMemoryRepository) -> Self {
        let interpreter = CommandInterpreter::default();
        let state = interpreter.new_state();
        let fs = VirtualFileSystemView::new(PathResolver::default(), Arc::new(repository));
        Self {
            interpreter,
            state,
            fs,
        }
    }

    async fn run(&mut self, line: &str) -> Vec<String> {
        self.interpreter
            .execute(line, &mut self.state, &mut self.fs)
            .await
            .lines
    }
}

#[tokio::test]
async fn mkdir_twice_reports_the_existing_directory() {
    let mut shell = Shell::new(InMemoryRepository::new());
    assert!(shell.run("mkdir notes").await.is_empty());
    let second = shell.run("mkdir notes").await;
    assert_eq!(second.len(), 1);
    assert!(second[0].contains("File exists"), "{second:?}");
    assert!(shell.run("ls").await.contains(&"notes".to_string()));
}

#[tokio::test]
async fn rm_refuses_non_empty_directories() {
    let mut shell = Shell::new(InMemoryRepository::new());
    shell.run("mkdir notes").await;
    shell.run("touch notes/todo.txt").await;
    assert_eq!(
        shell.run("rm notes").await,
        vec!["rm: cannot remove 'notes': Directory not empty"]
    );
    assert!(shell.run("rm notes/todo.txt").await.is_empty());
    assert!(shell.run("rm notes").await.is_empty());
    assert!(!shell.run("ls").await.contains(&"notes".to_string()));
}

#[tokio::test]
async fn cd_into_a_file_leaves_the_directory_alone() {
    let mut shell = Shell::new(InMemoryRepository::new());
    assert_eq!(
        shell.run("cd package.json").await,
        vec!["cd: package.json: Not a directory"]
    );
    assert_eq!(shell.run("pwd").await, vec!["~/portfolio"]);
    shell.run("cd ..").await;
    assert_eq!(shell.state.current_path(), "/home/developer");
}

#[tokio::test]
async fn dynamic_files_shadow_static_ones() {
    let repository = InMemoryRepository::from_seed_json(
        r#"{"simulatedFiles": [
            {"name": "package.json", "path": "~/portfolio", "type": "file", "content": "from the repository"},
            {"name": "resume.pdf", "path": "/home/developer/portfolio", "type": "file", "url": "https://example.com/resume.pdf"}
        ]}"#,
    )
    .unwrap();
    let mut shell = Shell::new(repository);

    assert_eq!(
        shell.run("ls").await,
        vec![".bashrc", "package.json", "resume.pdf"]
    );
    assert_eq!(shell.run("cat package.json").await, vec!["from the repository"]);
    assert_eq!(
        shell.run("cat resume.pdf").await,
        vec!["https://example.com/resume.pdf"]
    );
}

#[tokio::test]
async fn unknown_commands_still_enter_history() {
    let mut shell = Shell::new(InMemoryRepository::new());
    assert_eq!(
        shell.run("frobnicate now").await,
        vec!["bash: frobnicate: command not found"]
    );
    shell.run("   ").await;
    assert_eq!(shell.state.history(), ["frobnicate now"]);
}

use std::{
    path::{Path, PathBuf},
    process::Command,
};

use log::{debug, warn};

use crate::range::RevisionRange;

/// Runs `git` for the rest of the library.
///
/// `run` returns the captured standard output, or `None` when git could not
/// be started, exited unsuccessfully, or printed nothing. With `trim` set the
/// output is stripped of surrounding whitespace; without it the raw output is
/// returned, which `git log` parsing relies on.
///
/// The provided methods build the queries this crate needs on top of `run`,
/// so any implementor (e.g. a canned one in tests) gets them for free.
pub trait GitRunner {
    fn run(&self, args: &[&str], trim: bool) -> Option<String>;

    /// The most recent tag reachable from `HEAD` whose name matches `pattern`
    /// and not `exclude` (both `git describe` globs).
    fn latest_tag(&self, pattern: &str, exclude: &str) -> Option<String> {
        self.run(
            &[
                "describe",
                "--tags",
                "--abbrev=0",
                &format!("--match={pattern}"),
                &format!("--exclude={exclude}"),
            ],
            true,
        )
    }

    /// The highest tag by version sort among all refs, reachable or not.
    /// Pre-release suffixes (`-rc.1`) sort before the release itself.
    fn latest_tag_from_all_refs(&self, pattern: &str) -> Option<String> {
        self.run(
            &[
                "-c",
                "versionsort.suffix=-",
                "for-each-ref",
                "--count=1",
                "--sort=-v:refname",
                "--format=%(refname:short)",
                &format!("refs/tags/{pattern}"),
            ],
            true,
        )
    }

    /// The tag preceding `current`, or preceding the newest tagged commit
    /// when `current` is `None`.
    fn previous_tag(&self, current: Option<&str>) -> Option<String> {
        let sha = self.run(
            &[
                "rev-list",
                "--tags",
                current.unwrap_or("--skip=1"),
                "--max-count=1",
            ],
            true,
        )?;
        self.run(&["describe", "--tags", "--abbrev=0", &format!("{sha}^")], true)
    }

    /// Expands an abbreviated hash (or any revision) to the full hash
    fn full_hash(&self, short: &str) -> Option<String> { self.run(&["rev-parse", short], true) }

    /// Raw `git log` output for `range` in the given `--pretty=format:`
    fn log(&self, range: &RevisionRange, format: &str, no_merges: bool) -> Option<String> {
        let pretty = format!("--pretty=format:{format}");
        let revisions = range.log_arg();

        let mut args = vec!["log", pretty.as_str()];
        if no_merges {
            args.push("--no-merges");
        }
        args.push(&revisions);

        self.run(&args, false)
    }
}

/// Runs the `git` binary, optionally against a repository other than the one
/// in the current directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GitCommand {
    /// The git dir with all the meta-data (Typically the `.git` sub-directory
    /// of the project)
    pub git_dir: Option<PathBuf>,
    /// The working directory of the git project (typically the project
    /// directory, or parent of the `.git` directory)
    pub work_tree: Option<PathBuf>,
}

impl GitCommand {
    /// Uses `dir` as the repository. A path ending in `.git` is taken as the
    /// git dir with its parent as the working tree, anything else as the
    /// working tree with a `.git` child.
    pub fn with_dir<P: AsRef<Path>>(dir: P) -> Self {
        let dir = dir.as_ref();
        if dir.ends_with(".git") {
            debug!("dir ends with .git");
            GitCommand {
                git_dir: Some(dir.to_path_buf()),
                work_tree: dir.parent().map(Path::to_path_buf),
            }
        } else {
            debug!("dir doesn't end with .git");
            GitCommand {
                git_dir: Some(dir.join(".git")),
                work_tree: Some(dir.to_path_buf()),
            }
        }
    }

    pub fn with_dirs<P: AsRef<Path>>(git_dir: P, work_tree: P) -> Self {
        GitCommand {
            git_dir: Some(git_dir.as_ref().to_path_buf()),
            work_tree: Some(work_tree.as_ref().to_path_buf()),
        }
    }

    fn location_args(&self) -> Vec<String> {
        let (git_dir, work_tree) = match (&self.git_dir, &self.work_tree) {
            (None, None) => return Vec::new(),
            (Some(g), Some(w)) => (g.clone(), w.clone()),
            // only a git dir i.e. /home/user/mycode/.git
            (Some(g), None) => (g.clone(), g.parent().map(Path::to_path_buf).unwrap_or_default()),
            // only a working tree i.e. /home/user/mycode
            (None, Some(w)) => (w.join(".git"), w.clone()),
        };

        vec![
            format!("--git-dir={}", git_dir.display()),
            format!("--work-tree={}", work_tree.display()),
        ]
    }
}

impl GitRunner for GitCommand {
    fn run(&self, args: &[&str], trim: bool) -> Option<String> {
        let location = self.location_args();
        debug!("Running git {:?} {:?}", location, args);

        let output = match Command::new("git").args(&location).args(args).output() {
            Ok(output) => output,
            Err(e) => {
                warn!("Failed to run git: {e}");
                return None;
            }
        };

        if !output.status.success() {
            debug!(
                "git {:?} exited with {}: {}",
                args,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
            return None;
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        if stdout.trim().is_empty() {
            return None;
        }

        Some(if trim {
            stdout.trim().to_owned()
        } else {
            stdout.into_owned()
        })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::{cell::RefCell, collections::HashMap};

    use super::*;

    /// Answers git invocations from a table keyed by the space-joined
    /// arguments, and remembers what was asked.
    #[derive(Debug, Default)]
    pub(crate) struct FakeGit {
        answers: HashMap<String, String>,
        pub(crate) calls: RefCell<Vec<String>>,
    }

    impl FakeGit {
        pub(crate) fn answer(mut self, args: &str, output: &str) -> Self {
            self.answers.insert(args.to_owned(), output.to_owned());
            self
        }
    }

    impl GitRunner for FakeGit {
        fn run(&self, args: &[&str], trim: bool) -> Option<String> {
            let key = args.join(" ");
            self.calls.borrow_mut().push(key.clone());
            self.answers
                .get(&key)
                .map(|out| if trim { out.trim().to_owned() } else { out.clone() })
        }
    }

    #[test]
    fn latest_tag_query() {
        let git = FakeGit::default().answer(
            "describe --tags --abbrev=0 --match=v* --exclude=*-beta.*",
            "v1.2.0\n",
        );
        assert_eq!(git.latest_tag("v*", "*-beta.*").as_deref(), Some("v1.2.0"));
        assert_eq!(git.latest_tag("*", "*-beta.*"), None);
    }

    #[test]
    fn latest_tag_from_all_refs_query() {
        let git = FakeGit::default().answer(
            "-c versionsort.suffix=- for-each-ref --count=1 --sort=-v:refname \
             --format=%(refname:short) refs/tags/*",
            "v2.0.0",
        );
        assert_eq!(git.latest_tag_from_all_refs("*").as_deref(), Some("v2.0.0"));
    }

    #[test]
    fn previous_tag_goes_through_rev_list() {
        let git = FakeGit::default()
            .answer("rev-list --tags v1.2.0 --max-count=1", "abc123\n")
            .answer("describe --tags --abbrev=0 abc123^", "v1.1.0\n")
            .answer("rev-list --tags --skip=1 --max-count=1", "fff000");
        assert_eq!(git.previous_tag(Some("v1.2.0")).as_deref(), Some("v1.1.0"));
        assert_eq!(git.previous_tag(None), None);
        assert_eq!(
            git.calls.borrow().last().map(String::as_str),
            Some("describe --tags --abbrev=0 fff000^")
        );
    }

    #[test]
    fn full_hash_query() {
        let git = FakeGit::default().answer("rev-parse abc", "abc123def\n");
        assert_eq!(git.full_hash("abc").as_deref(), Some("abc123def"));
    }

    #[test]
    fn log_arguments() {
        let git = FakeGit::default();
        git.log(&RevisionRange::everything(), "%s", true);
        git.log(&RevisionRange::new("v1.0.0", "HEAD"), "%s", false);
        assert_eq!(
            *git.calls.borrow(),
            vec![
                "log --pretty=format:%s --no-merges HEAD".to_owned(),
                "log --pretty=format:%s v1.0.0...HEAD".to_owned(),
            ]
        );
    }

    #[test]
    fn log_keeps_raw_output() {
        let git = FakeGit::default().answer("log --pretty=format:%b HEAD", "\n  body  \n");
        assert_eq!(
            git.log(&RevisionRange::everything(), "%b", false).as_deref(),
            Some("\n  body  \n")
        );
    }

    #[test]
    fn location_arguments() {
        assert!(GitCommand::default().location_args().is_empty());
        assert_eq!(
            GitCommand::with_dir("/myproject").location_args(),
            vec!["--git-dir=/myproject/.git", "--work-tree=/myproject"]
        );
        assert_eq!(
            GitCommand::with_dir("/myproject/.git").location_args(),
            vec!["--git-dir=/myproject/.git", "--work-tree=/myproject"]
        );
        let only_tree = GitCommand {
            git_dir: None,
            work_tree: Some("/code".into()),
        };
        assert_eq!(
            only_tree.location_args(),
            vec!["--git-dir=/code/.git", "--work-tree=/code"]
        );
    }
}

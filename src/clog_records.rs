use std::{
    env, fs,
    fs::File,
    io::{stdout, BufWriter},
    path::Path,
};

use log::debug;

use crate::{
    config::RawCfg,
    error::{Error, Result},
    fmt::{FormatWriter, JsonWriter, OnelineWriter, RecordFormat},
    git::{GitCommand, GitRunner},
    gitlog::{self, DEFAULT_SENTINEL, SUMMARY_FORMAT},
    range::RevisionRange,
    record::CommitRecords,
    DEFAULT_CONFIG_FILE,
};

/// The base struct used to set options and pull commit records out of a
/// repository.
///
/// `R` is whatever runs `git`; normally the `git` binary through
/// [`GitCommand`].
#[derive(Debug, Clone)]
pub struct ClogRecords<R = GitCommand> {
    /// Where to start looking for commits. When unset the range is worked out
    /// from the release tags
    pub from: Option<String>,
    /// Where to stop looking for commits when `from` is set (Defaults to
    /// `HEAD`)
    pub to: String,
    /// Whether the release being prepared bumps the version (Defaults to
    /// `true`). Without a bump the latest tag's commits are collected again
    pub increment: bool,
    /// The `git describe --match` glob for release tags (Defaults to `*`)
    pub tag_match: String,
    /// The `git describe --exclude` glob for release tags (Defaults to
    /// `*-beta.*`)
    pub tag_exclude: String,
    /// The string terminating every commit in the `git log` output (Defaults
    /// to `==END==`)
    pub sentinel: String,
    /// Whether merge commits are parsed too (Defaults to `false`)
    pub include_merges: bool,
    /// The file to write records to (Defaults to `stdout`)
    pub outfile: Option<String>,
    /// The format to output the records in (Defaults to JSON)
    pub out_format: RecordFormat,
    /// Runs the `git` queries
    pub git: R,
}

impl Default for ClogRecords<GitCommand> {
    fn default() -> Self {
        debug!("Creating default clog-records with ClogRecords::default()");
        ClogRecords {
            from: None,
            to: "HEAD".to_owned(),
            increment: true,
            tag_match: "*".to_owned(),
            tag_exclude: "*-beta.*".to_owned(),
            sentinel: DEFAULT_SENTINEL.to_owned(),
            include_merges: false,
            outfile: None,
            out_format: RecordFormat::Json,
            git: GitCommand::default(),
        }
    }
}

impl ClogRecords<GitCommand> {
    /// Creates a default `ClogRecords` struct using the current working
    /// directory and the default `.clog.toml` configuration file, if there
    /// is one.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use clog_records::ClogRecords;
    /// let clog = ClogRecords::new().unwrap();
    /// ```
    pub fn new() -> Result<Self> {
        debug!("Creating default clog-records with new()");
        ClogRecords::from_file(DEFAULT_CONFIG_FILE)
    }

    /// Creates a `ClogRecords` struct from a TOML configuration file. The
    /// parent directory of the file is used as the repository.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use clog_records::ClogRecords;
    /// let clog = ClogRecords::from_file("/myproject/clog_conf.toml").unwrap();
    /// ```
    pub fn from_file<P: AsRef<Path>>(file: P) -> Result<Self> {
        debug!("Creating clog-records with \n\tfile: {:?}", file.as_ref());
        let cfg_file = if file.as_ref().is_relative() {
            let cwd = env::current_dir().map_err(|_| Error::CurrentDir)?;
            cwd.join(file.as_ref())
        } else {
            file.as_ref().to_path_buf()
        };

        // We assume whatever dir the config file is in also contains the git metadata
        let dir = cfg_file.parent().map(Path::to_path_buf).unwrap_or_default();
        ClogRecords::with_dir_and_file(dir, cfg_file)
    }

    /// Creates a `ClogRecords` struct for the repository at `dir` (either the
    /// working tree or its `.git` directory), reading `.clog.toml` from the
    /// current directory.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use clog_records::ClogRecords;
    /// let clog = ClogRecords::with_dir("/myproject").unwrap();
    /// ```
    pub fn with_dir<P: AsRef<Path>>(dir: P) -> Result<Self> {
        debug!("Creating clog-records with \n\tdir: {:?}", dir.as_ref());
        ClogRecords {
            git: GitCommand::with_dir(dir),
            ..ClogRecords::default()
        }
        .try_config_file(Path::new(DEFAULT_CONFIG_FILE))
    }

    /// Creates a `ClogRecords` struct for the repository at `dir` with a custom
    /// configuration file.
    pub fn with_dir_and_file<P: AsRef<Path>>(dir: P, cfg_file: P) -> Result<Self> {
        debug!(
            "Creating clog-records with \n\tdir: {:?}\n\tcfg_file: {:?}",
            dir.as_ref(),
            cfg_file.as_ref()
        );
        ClogRecords {
            git: GitCommand::with_dir(dir),
            ..ClogRecords::default()
        }
        .try_config_file(cfg_file.as_ref())
    }

    /// Creates a `ClogRecords` struct using a specific git directory AND
    /// working tree.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use clog_records::ClogRecords;
    /// let clog = ClogRecords::with_dirs("/myproject/.git", "/myproject").unwrap();
    /// ```
    pub fn with_dirs<P: AsRef<Path>>(git_dir: P, work_tree: P) -> Result<Self> {
        debug!(
            "Creating clog-records with \n\tgit_dir: {:?}\n\twork_tree: {:?}",
            git_dir.as_ref(),
            work_tree.as_ref()
        );
        ClogRecords {
            git: GitCommand::with_dirs(git_dir, work_tree),
            ..ClogRecords::default()
        }
        .try_config_file(Path::new(DEFAULT_CONFIG_FILE))
    }

    // A missing file leaves the defaults alone, a broken one is an error
    fn try_config_file(mut self, cfg_file: &Path) -> Result<Self> {
        debug!("Trying to use config file: {:?}", cfg_file);
        if !cfg_file.is_file() {
            debug!("No config file, using defaults");
            return Ok(self);
        }

        let toml_s = fs::read_to_string(cfg_file)?;
        let cfg: RawCfg =
            toml::from_str(&toml_s).map_err(|e| Error::ConfigParse(cfg_file.to_path_buf(), e))?;
        let cfg = cfg.records;

        if cfg.from.is_some() {
            self.from = cfg.from;
        }
        if let Some(to) = cfg.to {
            self.to = to;
        }
        if let Some(increment) = cfg.increment {
            self.increment = increment;
        }
        if let Some(tag_match) = cfg.tag_match {
            self.tag_match = tag_match;
        }
        if let Some(tag_exclude) = cfg.tag_exclude {
            self.tag_exclude = tag_exclude;
        }
        if let Some(sentinel) = cfg.sentinel {
            self.sentinel = sentinel;
        }
        if cfg.outfile.is_some() {
            self.outfile = cfg.outfile;
        }
        if let Some(format) = cfg.output_format {
            self.out_format = format;
        }
        self.include_merges = cfg.include_merges;
        if cfg.git_dir.is_some() {
            self.git.git_dir = cfg.git_dir;
        }
        if cfg.git_work_tree.is_some() {
            self.git.work_tree = cfg.git_work_tree;
        }

        debug!("Returning clog-records:\n{:?}", self);
        Ok(self)
    }

    /// Sets the `git` metadata directory (typically `.git` child of your
    /// project working tree)
    pub fn git_dir<P: AsRef<Path>>(mut self, d: P) -> Self {
        self.git.git_dir = Some(d.as_ref().to_path_buf());
        self
    }

    /// Sets the `git` working tree directory (typically your project directory)
    pub fn git_work_tree<P: AsRef<Path>>(mut self, d: P) -> Self {
        self.git.work_tree = Some(d.as_ref().to_path_buf());
        self
    }
}

impl<R> ClogRecords<R> {
    /// Swaps out what runs the `git` queries, keeping every other option.
    pub fn runner<G: GitRunner>(self, git: G) -> ClogRecords<G> {
        ClogRecords {
            from: self.from,
            to: self.to,
            increment: self.increment,
            tag_match: self.tag_match,
            tag_exclude: self.tag_exclude,
            sentinel: self.sentinel,
            include_merges: self.include_merges,
            outfile: self.outfile,
            out_format: self.out_format,
            git,
        }
    }

    /// Sets how far back to begin searching commits using a tag, short hash
    /// or full hash. This bypasses the tag based range resolution.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use clog_records::ClogRecords;
    /// let clog = ClogRecords::new().unwrap().from("6d8183f");
    /// ```
    pub fn from<S: Into<String>>(mut self, f: S) -> Self {
        self.from = Some(f.into());
        self
    }

    /// Sets what point to stop searching for commits (Defaults to `HEAD`).
    /// Only used together with `from`.
    pub fn to<S: Into<String>>(mut self, t: S) -> Self {
        self.to = t.into();
        self
    }

    /// Sets whether this release bumps the version
    pub fn increment(mut self, i: bool) -> Self {
        self.increment = i;
        self
    }

    pub fn tag_match<S: Into<String>>(mut self, m: S) -> Self {
        self.tag_match = m.into();
        self
    }

    pub fn tag_exclude<S: Into<String>>(mut self, e: S) -> Self {
        self.tag_exclude = e.into();
        self
    }

    /// Sets the per-commit terminator used in the `git log` format
    pub fn sentinel<S: Into<String>>(mut self, s: S) -> Self {
        self.sentinel = s.into();
        self
    }

    pub fn include_merges(mut self, m: bool) -> Self {
        self.include_merges = m;
        self
    }

    /// Sets the file records are written to (Defaults to `stdout` if omitted)
    pub fn outfile<S: Into<String>>(mut self, o: S) -> Self {
        self.outfile = Some(o.into());
        self
    }

    /// The format of output for the records (Defaults to JSON)
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use clog_records::{fmt::RecordFormat, ClogRecords};
    /// let clog = ClogRecords::new().unwrap().output_format(RecordFormat::Oneline);
    /// ```
    pub fn output_format(mut self, f: RecordFormat) -> Self {
        self.out_format = f;
        self
    }
}

impl<R: GitRunner> ClogRecords<R> {
    /// Works out the commits of the release being prepared from the latest
    /// and previous release tags. See [`RevisionRange::from_tags`].
    pub fn resolve_range(&self, is_increment: bool) -> RevisionRange {
        let latest = self.git.latest_tag(&self.tag_match, &self.tag_exclude);
        let previous = match latest.as_deref() {
            Some(tag) if !is_increment => self.git.previous_tag(Some(tag)),
            _ => None,
        };
        debug!("Latest tag: {latest:?}, previous tag: {previous:?}");

        RevisionRange::from_tags(latest.as_deref(), previous.as_deref(), is_increment)
    }

    /// The range records are collected from: `from..to` when `from` was set,
    /// otherwise the tag based resolution.
    pub fn range(&self) -> RevisionRange {
        match self.from.as_deref().map(str::trim) {
            Some(from) if !from.is_empty() => RevisionRange::new(from, self.to.as_str()),
            _ => self.resolve_range(self.increment),
        }
    }

    /// Parses every commit in `range`, newest first.
    ///
    /// A failing `git log` yields no records.
    pub fn build_commit_log(&self, range: &RevisionRange) -> CommitRecords {
        debug!("Collecting commits in {range}");
        let format = gitlog::record_format(&self.sentinel);
        match self.git.log(range, &format, !self.include_merges) {
            Some(raw) => gitlog::parse_log(&raw, &self.sentinel),
            None => {
                debug!("git log returned nothing");
                Vec::new()
            }
        }
    }

    /// Retrieves the records of every commit in [`ClogRecords::range`].
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use clog_records::ClogRecords;
    /// let clog = ClogRecords::new().unwrap();
    /// let features = clog
    ///     .get_records()
    ///     .into_iter()
    ///     .filter(|r| r.commit_type == "feat");
    /// ```
    pub fn get_records(&self) -> CommitRecords { self.build_commit_log(&self.range()) }

    /// `* subject (short hash)` lines for the same commits as
    /// [`ClogRecords::get_records`]
    pub fn get_summary(&self) -> Vec<String> {
        self.git
            .log(&self.range(), SUMMARY_FORMAT, !self.include_merges)
            .map(|raw| {
                raw.lines()
                    .filter(|l| !l.trim().is_empty())
                    .map(str::to_owned)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Writes the records using whatever options have been specified thus
    /// far.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use clog_records::ClogRecords;
    /// let clog = ClogRecords::new().unwrap();
    /// clog.write_records().unwrap();
    /// ```
    pub fn write_records(&self) -> Result<()> {
        debug!("Writing records with preset options");
        if let Some(ref out) = self.outfile {
            debug!("outfile set to: {:?}", out);
            self.write_records_to(out)
        } else {
            debug!("outfile not set using stdout");
            let out = stdout();
            let mut out_buf = BufWriter::new(out.lock());
            match self.out_format {
                RecordFormat::Json => {
                    let mut writer = JsonWriter::new(&mut out_buf);
                    self.write_records_with(&mut writer)
                }
                RecordFormat::Oneline => {
                    let mut writer = OnelineWriter::new(&mut out_buf);
                    self.write_records_with(&mut writer)
                }
            }
        }
    }

    /// Writes the records to a file, replacing its contents.
    pub fn write_records_to<P: AsRef<Path>>(&self, out: P) -> Result<()> {
        debug!("Writing records to file: {:?}", out.as_ref());
        let mut file = File::create(out.as_ref())?;
        match self.out_format {
            RecordFormat::Json => {
                let mut writer = JsonWriter::new(&mut file);
                self.write_records_with(&mut writer)
            }
            RecordFormat::Oneline => {
                let mut writer = OnelineWriter::new(&mut file);
                self.write_records_with(&mut writer)
            }
        }
    }

    /// Writes the records with a specified `FormatWriter`
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use clog_records::{ClogRecords, fmt::{FormatWriter, JsonWriter}};
    /// # use std::io;
    /// let clog = ClogRecords::new().unwrap();
    ///
    /// let out = io::stdout();
    /// let mut out_buf = io::BufWriter::new(out.lock());
    /// let mut writer = JsonWriter::new(&mut out_buf);
    ///
    /// clog.write_records_with(&mut writer).unwrap();
    /// ```
    pub fn write_records_with<W>(&self, writer: &mut W) -> Result<()>
    where
        W: FormatWriter,
    {
        writer.write_records(&self.get_records())
    }
}

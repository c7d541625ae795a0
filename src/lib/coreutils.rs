//! find(1)
//!
//! There is no support for the logical expressions find(1) allows (`-o`,
//! `-not`, parentheses). Options are emitted in a fixed order: global
//! options and starting points first, tests next, actions last.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::compiler::{Record, RecordDescriptor};
use crate::field::{ArgValue, FieldSpec, Value};

/// Options of find(1), one field per option
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Find {
    // The last of -P, -L and -H wins in find(1); since their order here is
    // fixed, treat them as mutually exclusive. -follow is not supported.
    pub do_not_follow_symlinks: bool,
    pub follow_symlinks: bool,
    pub follow_initial_symlinks: bool,

    /// -D <debugoptions>
    pub debug_options: String,
    /// -O<level>
    pub optimization: u8,

    /// Starting points of the traversal
    pub dirnames: Vec<String>,

    pub day_start: bool,
    pub depth_first: bool,
    pub ignore_readdir_race: bool,
    pub max_depth: Option<u32>,
    pub min_depth: Option<u32>,
    pub no_leaf: bool,
    pub regex_type: String,
    pub warn: bool,
    /// -xdev (formerly -mount)
    pub xdev: bool,

    /// -amin <n>
    pub accessed_minutes_ago: Option<FindN>,
    /// -anewer <file>
    pub accessed_since_file: String,
    /// -atime <n>
    pub accessed_days_ago: Option<FindN>,
    /// -cmin <n>
    pub changed_minutes_ago: Option<FindN>,
    /// -cnewer <file>
    pub changed_since_file: String,
    /// -ctime <n>
    pub changed_days_ago: Option<FindN>,
    pub empty: bool,
    pub executable: bool,
    #[serde(rename = "false")]
    pub false_: bool,
    /// -fstype <type>
    pub filesystem_type: String,
    pub gid: Option<FindN>,
    pub group: String,
    /// -ilname <pattern>
    pub symlink_target_case_insensitive: String,
    /// -iname <pattern>
    pub name_case_insensitive: String,
    /// -inum <n>
    pub inode: Option<FindN>,
    /// -iregex <pattern>
    pub regex_case_insensitive: String,
    /// -iwholename <pattern>
    pub wholename_case_insensitive: String,
    pub links: Option<FindN>,
    /// -lname <pattern>
    pub link_name: String,
    /// -mmin <n>
    pub modified_minutes_ago: Option<FindN>,
    /// -mtime <n>
    pub modified_days_ago: Option<FindN>,
    pub name: String,
    /// -newer <file>
    pub modified_since_file: String,
    /// -newer <file>
    pub newer: String,
    /// -nogroup
    pub unnamed_group: bool,
    /// -nouser
    pub unnamed_user: bool,
    pub path: String,
    /// -perm <mode>
    pub mode: Option<u32>,
    /// -perm -<mode>
    pub mode_mask_all: Option<u32>,
    /// -perm /<mode>
    pub mode_mask_any: Option<u32>,
    pub readable: bool,
    pub regex: String,
    pub same_file: String,
    /// -size <n>c; only byte sizes are supported
    pub size: Option<FindN>,
    #[serde(rename = "true")]
    pub true_: bool,
    #[serde(rename = "type")]
    pub type_: Option<FindType>,
    pub uid: Option<FindN>,
    pub used: Option<FindN>,
    pub user: String,
    pub writable: bool,
    pub xtype: Option<FindType>,

    pub delete: bool,
    /// -exec <command> ; or -exec <command> +, see [`find_exec`]
    pub exec: Vec<String>,
    pub exec_dir: Vec<String>,
    pub fls: String,
    pub fprint: String,
    pub fprint0: String,
    /// -fprintf <file> <format>
    pub fprintf: [String; 2],
    pub ls: bool,
    pub ok: Vec<String>,
    pub ok_dir: Vec<String>,
    pub print: bool,
    pub print0: bool,
    pub printf: String,
    pub prune: bool,
    pub quit: bool,
}

impl Record for Find {
    const DESCRIPTOR: RecordDescriptor = RecordDescriptor {
        name: "Find",
        fields: &[
            FieldSpec::new("do_not_follow_symlinks").flag("-P").first(),
            FieldSpec::new("follow_symlinks").flag("-L").first(),
            FieldSpec::new("follow_initial_symlinks").flag("-H").first(),
            FieldSpec::new("debug_options").flag("-D").first(),
            FieldSpec::new("optimization").flag("-O").first().sep("-"),
            FieldSpec::new("dirnames").first(),
            FieldSpec::new("day_start").flag("-daystart"),
            FieldSpec::new("depth_first").flag("-depth"),
            FieldSpec::new("ignore_readdir_race").flag("-ignore_readdir_race"),
            FieldSpec::new("max_depth").flag("-maxdepth"),
            FieldSpec::new("min_depth").flag("-mindepth"),
            FieldSpec::new("no_leaf").flag("-noleaf"),
            FieldSpec::new("regex_type").flag("-regextype"),
            FieldSpec::new("warn").flag("-warn"),
            FieldSpec::new("xdev").flag("-xdev"),
            FieldSpec::new("accessed_minutes_ago").flag("-amin"),
            FieldSpec::new("accessed_since_file").flag("-anewer"),
            FieldSpec::new("accessed_days_ago").flag("-atime"),
            FieldSpec::new("changed_minutes_ago").flag("-cmin"),
            FieldSpec::new("changed_since_file").flag("-cnewer"),
            FieldSpec::new("changed_days_ago").flag("-ctime"),
            FieldSpec::new("empty").flag("-empty"),
            FieldSpec::new("executable").flag("-executable"),
            FieldSpec::new("false").flag("-false"),
            FieldSpec::new("filesystem_type").flag("-fstype"),
            FieldSpec::new("gid").flag("-gid"),
            FieldSpec::new("group").flag("-group"),
            FieldSpec::new("symlink_target_case_insensitive").flag("-ilname"),
            FieldSpec::new("name_case_insensitive").flag("-iname"),
            FieldSpec::new("inode").flag("-inum"),
            FieldSpec::new("regex_case_insensitive").flag("-iregex"),
            FieldSpec::new("wholename_case_insensitive").flag("-iwholename"),
            FieldSpec::new("links").flag("-links"),
            FieldSpec::new("link_name").flag("-lname"),
            FieldSpec::new("modified_minutes_ago").flag("-mmin"),
            FieldSpec::new("modified_days_ago").flag("-mtime"),
            FieldSpec::new("name").flag("-name"),
            FieldSpec::new("modified_since_file").flag("-newer"),
            FieldSpec::new("newer").flag("-newer"),
            FieldSpec::new("unnamed_group").flag("-nogroup"),
            FieldSpec::new("unnamed_user").flag("-nouser"),
            FieldSpec::new("path").flag("-path"),
            FieldSpec::new("mode").flag("-perm").format("%o"),
            FieldSpec::new("mode_mask_all").flag("-perm").format("-%o"),
            FieldSpec::new("mode_mask_any").flag("-perm").format("/%o"),
            FieldSpec::new("readable").flag("-readable"),
            FieldSpec::new("regex").flag("-regex"),
            FieldSpec::new("same_file").flag("-samefile"),
            FieldSpec::new("size").flag("-size").format("%sc"),
            FieldSpec::new("true").flag("-true"),
            FieldSpec::new("type").flag("-type"),
            FieldSpec::new("uid").flag("-uid"),
            FieldSpec::new("used").flag("-used"),
            FieldSpec::new("user").flag("-user"),
            FieldSpec::new("writable").flag("-writable"),
            FieldSpec::new("xtype").flag("-xtype"),
            FieldSpec::new("delete").flag("-delete").last(),
            FieldSpec::new("exec").flag("-exec").last(),
            FieldSpec::new("exec_dir").flag("-execdir").last(),
            FieldSpec::new("fls").flag("-fls").last(),
            FieldSpec::new("fprint").flag("-fprint").last(),
            FieldSpec::new("fprint0").flag("-fprint0").last(),
            FieldSpec::new("fprintf").flag("-fprintf").last(),
            FieldSpec::new("ls").flag("-ls").last(),
            FieldSpec::new("ok").flag("-ok").last(),
            FieldSpec::new("ok_dir").flag("-okdir").last(),
            FieldSpec::new("print").flag("-print").last(),
            FieldSpec::new("print0").flag("-print0").last(),
            FieldSpec::new("printf").flag("-printf").last(),
            FieldSpec::new("prune").flag("-prune").last(),
            FieldSpec::new("quit").flag("-quit").last(),
        ],
    };

    fn values(&self) -> Vec<Value<'_>> {
        vec![
            self.do_not_follow_symlinks.to_value(),
            self.follow_symlinks.to_value(),
            self.follow_initial_symlinks.to_value(),
            self.debug_options.to_value(),
            self.optimization.to_value(),
            self.dirnames.to_value(),
            self.day_start.to_value(),
            self.depth_first.to_value(),
            self.ignore_readdir_race.to_value(),
            self.max_depth.to_value(),
            self.min_depth.to_value(),
            self.no_leaf.to_value(),
            self.regex_type.to_value(),
            self.warn.to_value(),
            self.xdev.to_value(),
            self.accessed_minutes_ago.to_value(),
            self.accessed_since_file.to_value(),
            self.accessed_days_ago.to_value(),
            self.changed_minutes_ago.to_value(),
            self.changed_since_file.to_value(),
            self.changed_days_ago.to_value(),
            self.empty.to_value(),
            self.executable.to_value(),
            self.false_.to_value(),
            self.filesystem_type.to_value(),
            self.gid.to_value(),
            self.group.to_value(),
            self.symlink_target_case_insensitive.to_value(),
            self.name_case_insensitive.to_value(),
            self.inode.to_value(),
            self.regex_case_insensitive.to_value(),
            self.wholename_case_insensitive.to_value(),
            self.links.to_value(),
            self.link_name.to_value(),
            self.modified_minutes_ago.to_value(),
            self.modified_days_ago.to_value(),
            self.name.to_value(),
            self.modified_since_file.to_value(),
            self.newer.to_value(),
            self.unnamed_group.to_value(),
            self.unnamed_user.to_value(),
            self.path.to_value(),
            self.mode.to_value(),
            self.mode_mask_all.to_value(),
            self.mode_mask_any.to_value(),
            self.readable.to_value(),
            self.regex.to_value(),
            self.same_file.to_value(),
            self.size.to_value(),
            self.true_.to_value(),
            self.type_.to_value(),
            self.uid.to_value(),
            self.used.to_value(),
            self.user.to_value(),
            self.writable.to_value(),
            self.xtype.to_value(),
            self.delete.to_value(),
            self.exec.to_value(),
            self.exec_dir.to_value(),
            self.fls.to_value(),
            self.fprint.to_value(),
            self.fprint0.to_value(),
            self.fprintf.to_value(),
            self.ls.to_value(),
            self.ok.to_value(),
            self.ok_dir.to_value(),
            self.print.to_value(),
            self.print0.to_value(),
            self.printf.to_value(),
            self.prune.to_value(),
            self.quit.to_value(),
        ]
    }
}

/// Terminator of an `-exec`-style command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FindExecMode {
    /// `;`: run once per file
    One,
    /// `+`: run with as many files as fit
    Many,
}

impl FindExecMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            FindExecMode::One => ";",
            FindExecMode::Many => "+",
        }
    }
}

/// Arguments for `exec`, `exec_dir`, `ok` and `ok_dir`, terminated by `mode`
pub fn find_exec<I, S>(mode: FindExecMode, args: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut exec: Vec<String> = args.into_iter().map(Into::into).collect();
    exec.push(mode.as_str().to_string());
    exec
}

/// Comparison qualifier of a numeric test argument
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FindNMode {
    #[default]
    Exact,
    GreaterThan,
    LessThan,
}

impl FindNMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            FindNMode::Exact => "",
            FindNMode::GreaterThan => "+",
            FindNMode::LessThan => "-",
        }
    }
}

/// A numeric test argument: `n`, `+n` or `-n`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(try_from = "String")]
pub struct FindN {
    pub mode: FindNMode,
    pub n: u64,
}

impl FindN {
    pub fn new(mode: FindNMode, n: u64) -> Self {
        Self { mode, n }
    }

    pub fn exact(n: u64) -> Self {
        Self::new(FindNMode::Exact, n)
    }

    pub fn greater_than(n: u64) -> Self {
        Self::new(FindNMode::GreaterThan, n)
    }

    pub fn less_than(n: u64) -> Self {
        Self::new(FindNMode::LessThan, n)
    }
}

impl fmt::Display for FindN {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.mode.as_str(), self.n)
    }
}

impl FromStr for FindN {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (mode, digits) = if let Some(rest) = s.strip_prefix('+') {
            (FindNMode::GreaterThan, rest)
        } else if let Some(rest) = s.strip_prefix('-') {
            (FindNMode::LessThan, rest)
        } else {
            (FindNMode::Exact, s)
        };
        digits
            .parse()
            .map(|n| FindN { mode, n })
            .map_err(|_| format!("invalid find(1) numeric argument: {:?}", s))
    }
}

impl TryFrom<String> for FindN {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl ArgValue for FindN {
    fn to_value(&self) -> Value<'_> {
        Value::other(*self == FindN::default(), self)
    }
}

/// File types accepted by -type and -xtype
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum FindType {
    #[serde(rename = "b")]
    Block,
    #[serde(rename = "c")]
    Character,
    #[serde(rename = "d")]
    Directory,
    #[serde(rename = "p")]
    Pipe,
    #[serde(rename = "f")]
    File,
    #[serde(rename = "l")]
    Link,
    #[serde(rename = "s")]
    Socket,
    #[serde(rename = "D")]
    Door,
}

impl FindType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FindType::Block => "b",
            FindType::Character => "c",
            FindType::Directory => "d",
            FindType::Pipe => "p",
            FindType::File => "f",
            FindType::Link => "l",
            FindType::Socket => "s",
            FindType::Door => "D",
        }
    }
}

impl fmt::Display for FindType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ArgValue for FindType {
    fn to_value(&self) -> Value<'_> {
        Value::other(false, self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_and_values_align() {
        assert_eq!(
            Find::DESCRIPTOR.fields.len(),
            Find::default().values().len()
        );
    }

    #[test]
    fn test_find_n_parse_and_display() {
        assert_eq!("+3".parse::<FindN>().unwrap(), FindN::greater_than(3));
        assert_eq!("-1000".parse::<FindN>().unwrap(), FindN::less_than(1000));
        assert_eq!("0".parse::<FindN>().unwrap(), FindN::exact(0));
        assert!("x".parse::<FindN>().is_err());
        assert_eq!(FindN::greater_than(3).to_string(), "+3");
    }

    #[test]
    fn test_find_exec_appends_terminator() {
        assert_eq!(
            find_exec(FindExecMode::One, ["cat", "{}"]),
            vec!["cat", "{}", ";"]
        );
        assert_eq!(find_exec(FindExecMode::Many, Vec::<String>::new()), vec!["+"]);
    }

    #[test]
    fn test_deserialize_from_json() {
        let find: Find = serde_json::from_str(
            r#"{"dirnames": ["."], "name": "*.rs", "type": "f", "links": "+3", "max_depth": 0}"#,
        )
        .unwrap();
        assert_eq!(find.dirnames, vec!["."]);
        assert_eq!(find.type_, Some(FindType::File));
        assert_eq!(find.links, Some(FindN::greater_than(3)));
        assert_eq!(find.max_depth, Some(0));
    }

    #[test]
    fn test_deserialize_rejects_unknown_fields() {
        assert!(serde_json::from_str::<Find>(r#"{"nmae": "typo"}"#).is_err());
    }
}

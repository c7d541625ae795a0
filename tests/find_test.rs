//! Tests for the find(1) schema

use shellac::coreutils::{find_exec, Find, FindExecMode, FindN, FindType};
use shellac::{command_name, compile_args};

fn args(find: &Find) -> Vec<String> {
    compile_args(find).unwrap()
}

#[test]
fn test_find() {
    assert!(args(&Find::default()).is_empty());
    assert_eq!(
        args(&Find {
            dirnames: vec![".".to_string()],
            ..Find::default()
        }),
        ["."]
    );
    assert_eq!(command_name::<Find>(), "find");
}

#[test]
fn test_find_name_and_type() {
    let find = Find {
        dirnames: vec![".".to_string()],
        name: "*.go".to_string(),
        type_: Some(FindType::File),
        ..Find::default()
    };
    assert_eq!(args(&find), [".", "-name", "*.go", "-type", "f"]);
}

#[test]
fn test_find_exec() {
    let find = Find {
        exec: find_exec(FindExecMode::One, ["cat", "{}"]),
        ..Find::default()
    };
    assert_eq!(args(&find), ["-exec", "cat", "{}", ";"]);

    let find = Find {
        exec: find_exec(FindExecMode::Many, ["grep", "foo bar", "{}"]),
        ..Find::default()
    };
    assert_eq!(args(&find), ["-exec", "grep", "foo bar", "{}", "+"]);
}

#[test]
fn test_find_mode() {
    let find = Find {
        mode: Some(0o644),
        ..Find::default()
    };
    assert_eq!(args(&find), ["-perm", "644"]);

    let find = Find {
        mode_mask_all: Some(0o644),
        ..Find::default()
    };
    assert_eq!(args(&find), ["-perm", "-644"]);

    let find = Find {
        mode_mask_any: Some(0o644),
        ..Find::default()
    };
    assert_eq!(args(&find), ["-perm", "/644"]);

    let find = Find {
        mode: Some(0),
        ..Find::default()
    };
    assert_eq!(args(&find), ["-perm", "0"]);
}

#[test]
fn test_find_n() {
    let find = Find {
        gid: Some(FindN::exact(0)),
        ..Find::default()
    };
    assert_eq!(args(&find), ["-gid", "0"]);

    let find = Find {
        links: Some(FindN::greater_than(3)),
        ..Find::default()
    };
    assert_eq!(args(&find), ["-links", "+3"]);

    let find = Find {
        uid: Some(FindN::less_than(1000)),
        ..Find::default()
    };
    assert_eq!(args(&find), ["-uid", "-1000"]);
}

#[test]
fn test_find_size_suffix() {
    let find = Find {
        size: Some(FindN::greater_than(1024)),
        ..Find::default()
    };
    assert_eq!(args(&find), ["-size", "+1024c"]);
}

#[test]
fn test_find_symlinks() {
    let find = Find {
        do_not_follow_symlinks: true,
        ..Find::default()
    };
    assert_eq!(args(&find), ["-P"]);

    let find = Find {
        follow_symlinks: true,
        ..Find::default()
    };
    assert_eq!(args(&find), ["-L"]);

    let find = Find {
        follow_initial_symlinks: true,
        ..Find::default()
    };
    assert_eq!(args(&find), ["-H"]);
}

#[test]
fn test_find_global_options_precede_dirnames() {
    let find = Find {
        dirnames: vec!["/tmp".to_string()],
        optimization: 2,
        follow_symlinks: true,
        debug_options: "stat".to_string(),
        max_depth: Some(0),
        ..Find::default()
    };
    assert_eq!(
        args(&find),
        ["-L", "-D", "stat", "-O2", "/tmp", "-maxdepth", "0"]
    );
}

#[test]
fn test_find_actions_come_last() {
    let find = Find {
        print0: true,
        dirnames: vec![".".to_string()],
        fprintf: ["out.txt".to_string(), "%p\\n".to_string()],
        empty: true,
        ..Find::default()
    };
    assert_eq!(
        args(&find),
        [".", "-empty", "-fprintf", "out.txt", "%p\\n", "-print0"]
    );
}

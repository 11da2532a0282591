//! End-to-end tests for `courtboard layout` commands.

use courtboard::models::SkillLevel;

mod fixtures;
use fixtures::*;

#[test]
fn test_show_seed_summary_json() {
    let env = TestEnv::new();

    let output = env.run(&["layout", "show", "--json"]);
    assert_success(&output, "Layout show");

    let json = stdout_json(&output);
    assert_eq!(json["center_name"], "Team Baddies Badminton Center");
    assert_eq!(json["rows"], 3);
    assert_eq!(json["cols"], 4);
    assert_eq!(json["capacity"], 12);
    assert_eq!(json["target"], 6);
    assert_eq!(json["assigned"], 6);
    assert_eq!(json["completion_percent"], 100);
    assert_eq!(json["complete"], true);
    assert_eq!(json["levels"]["intermediate"], 2);
}

#[test]
fn test_show_human_readable() {
    let env = TestEnv::with_layout(&two_court_layout());

    let output = env.run(&["layout", "show"]);
    assert_success(&output, "Layout show");

    let out = stdout(&output);
    assert!(out.contains("Test Center"));
    assert!(out.contains("2/4 assigned (50%)"));
    assert!(out.contains("2 remaining"));
    assert!(out.contains("Total: 2 | Beginner: 1 | Intermediate: 0 | Advanced: 1"));
}

#[test]
fn test_resize_warns_about_hidden_courts() {
    let layout = test_layout(
        2,
        2,
        &[
            ("A", SkillLevel::Beginner, 0, 0),
            ("B", SkillLevel::Advanced, 1, 1),
        ],
    );
    let env = TestEnv::with_layout(&layout);

    let output = env.run(&["layout", "resize", "--rows", "1", "--cols", "1"]);
    assert_success(&output, "Resize");
    assert!(stdout(&output).contains("Grid resized to 1 x 1"));
    assert!(stderr(&output).contains("1 active courts are outside the new grid"));

    let saved = env.read_layout();
    assert_eq!(saved.layout_settings.rows, 1);
    assert!(saved.find(2).unwrap().active, "Hidden courts stay active");

    let output = env.run(&["layout", "show", "--json"]);
    assert_eq!(stdout_json(&output)["hidden"], 1);
}

#[test]
fn test_resize_out_of_range_fails() {
    let env = TestEnv::with_layout(&two_court_layout());

    let output = env.run(&["layout", "resize", "--rows", "0", "--cols", "3"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("rows must be between 1 and 10"));

    let output = env.run(&["layout", "resize", "--rows", "3", "--cols", "11"]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_rename_and_target() {
    let env = TestEnv::with_layout(&two_court_layout());

    let output = env.run(&["layout", "rename", "--center-name", "  North Hall  "]);
    assert_success(&output, "Rename");
    assert!(stdout(&output).contains("Center renamed to 'North Hall'"));

    let output = env.run(&["layout", "target", "--count", "2"]);
    assert_success(&output, "Target");

    let output = env.run(&["layout", "show", "--json"]);
    let json = stdout_json(&output);
    assert_eq!(json["center_name"], "North Hall");
    assert_eq!(json["target"], 2);
    assert_eq!(json["complete"], true);

    let output = env.run(&["layout", "target", "--count", "51"]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_blank_center_name_fails() {
    let env = TestEnv::with_layout(&two_court_layout());

    let output = env.run(&["layout", "rename", "--center-name", "   "]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("center name cannot be empty"));
}

#[test]
fn test_finalize_requires_all_courts() {
    let env = TestEnv::with_layout(&two_court_layout());

    let output = env.run(&["layout", "finalize"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("2 courts still need to be assigned"));

    assert_success(&env.run(&["courts", "autofill"]), "Autofill");

    let output = env.run(&["layout", "finalize"]);
    assert_success(&output, "Finalize");
    assert!(stdout(&output).contains("Layout finalized: 4 courts configured for Test Center"));

    let audit = env.read_audit();
    let last = audit.last().unwrap();
    assert_eq!(last["action"], "Layout Finalized");
    assert_eq!(last["details"], "4 courts configured");
    assert_eq!(last["user_type"], "admin");
}

#[test]
fn test_data_dir_option_is_documented() {
    let env = TestEnv::new();

    for args in [
        ["layout", "finalize", "--help"],
        ["players", "remove", "--help"],
        ["audit", "list", "--help"],
    ] {
        let output = env.command(&args).output().unwrap();
        assert_success(&output, "Help");
        let out = stdout(&output);
        assert!(out.contains("--data-dir <DIR>"), "{args:?} help lists --data-dir");
        assert!(out.contains("Directory holding the data files"));
    }
}

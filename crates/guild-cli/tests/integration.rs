use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn guild(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("guild").unwrap();
    cmd.current_dir(dir.path()).env("GUILD_ROOT", dir.path());
    cmd
}

fn init_club(dir: &TempDir) {
    guild(dir).args(["init", "--name", "test-club"]).assert().success();
}

fn add_member(dir: &TempDir, slug: &str, tier: &str) {
    guild(dir)
        .args([
            "member",
            "add",
            slug,
            "--name",
            slug,
            "--email",
            &format!("{slug}@example.com"),
            "--tier",
            tier,
            "--expires",
            "2027-01-01T00:00:00Z",
        ])
        .assert()
        .success();
}

fn add_project(dir: &TempDir, slug: &str, designer: &str, title: &str) {
    guild(dir)
        .args([
            "project", "add", slug, "--designer", designer, "--title", title,
        ])
        .assert()
        .success();
}

// ---------------------------------------------------------------------------
// guild init
// ---------------------------------------------------------------------------

#[test]
fn init_creates_directory_tree() {
    let dir = TempDir::new().unwrap();
    guild(&dir).arg("init").assert().success();

    assert!(dir.path().join(".guild").is_dir());
    assert!(dir.path().join(".guild/members").is_dir());
    assert!(dir.path().join(".guild/projects").is_dir());
    assert!(dir.path().join(".guild/config.yaml").exists());
}

#[test]
fn init_is_idempotent() {
    let dir = TempDir::new().unwrap();
    guild(&dir).arg("init").assert().success();
    guild(&dir).arg("init").assert().success();
}

// ---------------------------------------------------------------------------
// guild member
// ---------------------------------------------------------------------------

#[test]
fn member_add_and_list() {
    let dir = TempDir::new().unwrap();
    init_club(&dir);
    add_member(&dir, "sari", "premium");

    guild(&dir)
        .args(["member", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("sari").and(predicate::str::contains("premium")));
}

#[test]
fn member_add_rejects_unknown_tier() {
    let dir = TempDir::new().unwrap();
    init_club(&dir);

    guild(&dir)
        .args([
            "member",
            "add",
            "sari",
            "--name",
            "Sari",
            "--email",
            "sari@example.com",
            "--tier",
            "platinum",
            "--expires",
            "2027-01-01T00:00:00Z",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid membership tier"));
}

#[test]
fn member_get_unknown_fails() {
    let dir = TempDir::new().unwrap();
    init_club(&dir);

    guild(&dir)
        .args(["member", "get", "ghost"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

// ---------------------------------------------------------------------------
// guild project
// ---------------------------------------------------------------------------

#[test]
fn project_add_and_advance() {
    let dir = TempDir::new().unwrap();
    init_club(&dir);
    add_member(&dir, "sari", "basic");
    add_project(&dir, "spice-route", "sari", "Spice Route");

    guild(&dir)
        .args(["project", "advance", "spice-route", "prototype"])
        .assert()
        .success();

    // Going backwards is rejected.
    guild(&dir)
        .args(["project", "advance", "spice-route", "concept"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid transition"));
}

#[test]
fn project_requires_existing_designer() {
    let dir = TempDir::new().unwrap();
    init_club(&dir);

    guild(&dir)
        .args([
            "project", "add", "orphan", "--designer", "nobody", "--title", "Orphan",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("member not found"));
}

// ---------------------------------------------------------------------------
// guild queue
// ---------------------------------------------------------------------------

#[test]
fn queue_submit_and_ranked_list() {
    let dir = TempDir::new().unwrap();
    init_club(&dir);
    add_member(&dir, "prem", "premium");
    add_member(&dir, "newbie", "basic");
    add_project(&dir, "premium-game", "prem", "Premium Game");
    add_project(&dir, "basic-game", "newbie", "Basic Game");

    guild(&dir).args(["queue", "submit", "premium-game"]).assert().success();
    guild(&dir).args(["queue", "submit", "basic-game"]).assert().success();

    // Both submitted just now: the premium designer's game ranks first
    // (tier bonus 100 vs 50) and its score shows in the table.
    let output = guild(&dir).args(["queue", "list"]).assert().success();
    let stdout = String::from_utf8(output.get_output().stdout.clone()).unwrap();
    let premium_pos = stdout.find("Premium Game").expect("premium game listed");
    let basic_pos = stdout.find("Basic Game").expect("basic game listed");
    assert!(premium_pos < basic_pos, "premium-tier game should rank first");
    assert!(stdout.contains("100"));
}

#[test]
fn queue_rejects_duplicate_submission() {
    let dir = TempDir::new().unwrap();
    init_club(&dir);
    add_member(&dir, "sari", "basic");
    add_project(&dir, "spice-route", "sari", "Spice Route");

    guild(&dir).args(["queue", "submit", "spice-route"]).assert().success();
    guild(&dir)
        .args(["queue", "submit", "spice-route"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already in the playtest queue"));
}

#[test]
fn queue_withdraw() {
    let dir = TempDir::new().unwrap();
    init_club(&dir);
    add_member(&dir, "sari", "basic");
    add_project(&dir, "spice-route", "sari", "Spice Route");

    guild(&dir).args(["queue", "submit", "spice-route"]).assert().success();
    guild(&dir).args(["queue", "withdraw", "Q1"]).assert().success();

    guild(&dir)
        .args(["queue", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("empty"));
}

// ---------------------------------------------------------------------------
// guild session + feedback
// ---------------------------------------------------------------------------

#[test]
fn session_lifecycle_pays_points() {
    let dir = TempDir::new().unwrap();
    init_club(&dir);
    add_member(&dir, "sari", "premium");
    add_member(&dir, "budi", "basic");
    add_project(&dir, "spice-route", "sari", "Spice Route");

    guild(&dir).args(["queue", "submit", "spice-route"]).assert().success();
    guild(&dir)
        .args([
            "session",
            "schedule",
            "spice-route",
            "--at",
            "2026-09-01T19:00:00Z",
            "--facilitator",
            "sari",
        ])
        .assert()
        .success();
    guild(&dir).args(["session", "register", "S1", "budi"]).assert().success();
    guild(&dir).args(["session", "complete", "S1"]).assert().success();

    // budi earned playtest points; the leaderboard reflects it.
    guild(&dir)
        .args(["points", "leaderboard"])
        .assert()
        .success()
        .stdout(predicate::str::contains("budi"));

    guild(&dir)
        .args(["member", "get", "budi"])
        .assert()
        .success()
        .stdout(predicate::str::contains("10 testing"));
}

#[test]
fn feedback_requires_registration() {
    let dir = TempDir::new().unwrap();
    init_club(&dir);
    add_member(&dir, "sari", "premium");
    add_member(&dir, "budi", "basic");
    add_project(&dir, "spice-route", "sari", "Spice Route");

    guild(&dir)
        .args([
            "session",
            "schedule",
            "spice-route",
            "--at",
            "2026-09-01T19:00:00Z",
            "--facilitator",
            "sari",
        ])
        .assert()
        .success();

    guild(&dir)
        .args([
            "feedback", "add", "S1", "--player", "budi", "--fun", "4", "--clarity", "3",
            "--balance", "4", "--theme", "5", "--mechanics", "4", "--play-again",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not registered"));

    guild(&dir).args(["session", "register", "S1", "budi"]).assert().success();
    guild(&dir)
        .args([
            "feedback", "add", "S1", "--player", "budi", "--fun", "4", "--clarity", "3",
            "--balance", "4", "--theme", "5", "--mechanics", "4", "--play-again",
        ])
        .assert()
        .success();

    // First feedback earns the badge automatically.
    guild(&dir)
        .args(["badge", "list", "budi"])
        .assert()
        .success()
        .stdout(predicate::str::contains("first-feedback"));
}

// ---------------------------------------------------------------------------
// guild badge
// ---------------------------------------------------------------------------

#[test]
fn badge_catalog_lists_builtins() {
    let dir = TempDir::new().unwrap();
    init_club(&dir);

    guild(&dir)
        .args(["badge", "catalog"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("first-feedback")
                .and(predicate::str::contains("published-designer")),
        );
}

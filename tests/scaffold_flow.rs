use hsm_scaffold::defaults::{ScaffoldConfig, TemplateNames};
use hsm_scaffold::scaffold;
use hsm_scaffold::MatchMode;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write(path: &Path, content: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn project() -> (TempDir, ScaffoldConfig) {
    let dir = TempDir::new().unwrap();
    let config = ScaffoldConfig {
        template_root: dir.path().join("src").join("Template"),
        target_root: dir.path().join("src"),
        ..ScaffoldConfig::default()
    };
    (dir, config)
}

#[test]
fn composite_then_region_then_rename() {
    let (dir, config) = project();
    let tpl = config.template_dir("CompositeAct");
    write(
        &tpl.join("CompositeAct.h"),
        "#include \"CompositeReg.h\"\nclass CompositeAct {\n    CompositeReg m_compositeReg;\n};\n",
    );
    write(
        &tpl.join("CompositeActInterface.h"),
        "#define COMPOSITE_ACT_START_REQ 1\n#define COMPOSITE_REG_START_REQ 2\n",
    );
    write(
        &tpl.join("CompositeReg").join("CompositeReg.cpp"),
        "CompositeReg::CompositeReg(CompositeAct &owner) {}\n",
    );
    write(
        &config.template_dir("SimpleReg").join("SimpleReg.h"),
        "class SimpleReg { /* SIMPLE_REG */ };\n",
    );

    let report = scaffold::add_composite_act(&config, "WasherAct", "DrumReg").unwrap();
    assert_eq!(report.processed.len(), 3);

    let act = config.target_root.join("WasherAct");
    assert_eq!(
        fs::read_to_string(act.join("WasherAct.h")).unwrap(),
        "#include \"DrumReg.h\"\nclass WasherAct {\n    DrumReg m_drumReg;\n};\n"
    );
    assert_eq!(
        fs::read_to_string(act.join("WasherActInterface.h")).unwrap(),
        "#define WASHER_ACT_START_REQ 1\n#define DRUM_REG_START_REQ 2\n"
    );
    assert_eq!(
        fs::read_to_string(act.join("DrumReg").join("DrumReg.cpp")).unwrap(),
        "DrumReg::DrumReg(WasherAct &owner) {}\n"
    );

    scaffold::add_simple_region(&config, "WasherAct", "PumpReg").unwrap();
    assert_eq!(
        fs::read_to_string(act.join("PumpReg").join("PumpReg.h")).unwrap(),
        "class PumpReg { /* PUMP_REG */ };\n"
    );

    let renamed = scaffold::rename_hsm_dir(&config, &act.join("PumpReg"), "FanReg").unwrap();
    assert!(act.join("PumpReg").exists());
    assert_eq!(
        fs::read_to_string(act.join("FanReg").join("FanReg.h")).unwrap(),
        "class FanReg { /* FAN_REG */ };\n"
    );
    assert!(renamed.hints[0].contains("PumpReg"));

    drop(dir);
}

#[test]
fn region_template_containing_act_template_is_rewritten_whole() {
    let (_dir, mut config) = project();
    config.templates = TemplateNames {
        composite_region: "CompositeActReg".to_string(),
        ..TemplateNames::default()
    };
    let tpl = config.template_dir("CompositeAct");
    write(
        &tpl.join("CompositeAct.h"),
        "CompositeActReg compositeActReg; COMPOSITE_ACT_REG; CompositeAct compositeAct;\n",
    );
    write(&tpl.join("CompositeActReg").join("CompositeActReg.h"), "CompositeActReg\n");

    scaffold::add_composite_act(&config, "WasherAct", "DrumReg").unwrap();

    let act = config.target_root.join("WasherAct");
    assert_eq!(
        fs::read_to_string(act.join("WasherAct.h")).unwrap(),
        "DrumReg drumReg; DRUM_REG; WasherAct washerAct;\n"
    );
    assert_eq!(
        fs::read_to_string(act.join("DrumReg").join("DrumReg.h")).unwrap(),
        "DrumReg\n"
    );
}

#[test]
fn pattern_mode_follows_configured_match_mode() {
    let (_dir, mut config) = project();
    config.match_mode = MatchMode::Pattern;
    write(
        &config.template_dir("SimpleAct").join("SimpleAct.h"),
        "class SimpleAct; simpleAct; SIMPLE_ACT\n",
    );

    scaffold::add_simple_act(&config, "LedAct").unwrap();

    let file = config.target_root.join("LedAct").join("LedAct.h");
    assert_eq!(fs::read_to_string(file).unwrap(), "class LedAct; ledAct; LED_ACT\n");
}

#[test]
fn failed_precondition_leaves_tree_untouched() {
    let (_dir, config) = project();
    write(&config.template_dir("SimpleAct").join("SimpleAct.h"), "SimpleAct\n");
    write(&config.target_root.join("LedAct").join("keep.txt"), "keep\n");

    let err = scaffold::add_simple_act(&config, "LedAct").unwrap_err();
    assert_eq!(err.code.as_str(), "scaffold.path_exists");
    assert_eq!(
        fs::read_to_string(config.target_root.join("LedAct").join("keep.txt")).unwrap(),
        "keep\n"
    );
    assert!(!config.target_root.join("LedAct").join("LedAct.h").exists());
}

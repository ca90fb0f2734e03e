// ==========================================
// 名册导入集成测试
// ==========================================
// 测试目标: 验证从 CSV 数据源到 RosterInput 的完整导入流程
// 覆盖范围: 列别名、是否标记、缺勤日期、历史计数汇总、
//           缺列与主键缺失、配置文件 → 导入 → 排班
// ==========================================


use duty_roster::config::{AppConfig, SourcePaths};
use duty_roster::domain::{DayType, Gender};
use duty_roster::engine::RosterScheduler;
use duty_roster::importer::{ImportError, RosterImporter, RosterSource};
use std::fs;
use test_helpers::{date, write_csv};

// ==========================================
// 测试用例 1: 分表导入
// ==========================================

#[test]
fn test_load_members_from_csv() {
    println!("\n=== 测试：成员名册导入 ===");

    let members_file = write_csv(&[
        "Nome,Sexo,Abertura,Decoração,Domingo,Quarta,Duplas Proibidas,Funções Proibidas",
        "Ana,F,SIM,,SIM,NÃO,Bruno,",
        "Bruno,M,,SIM,,SIM,,Portaria",
        ",,,,,,,",
        "Carla,F,NÃO,NÃO,NÃO,,,",
    ]);

    let importer = RosterImporter::new();
    let members = importer.load_members(members_file.path()).unwrap();

    println!("  - 成员数: {}", members.len());
    assert_eq!(members.len(), 3);

    let ana = &members[0];
    assert_eq!(ana.gender, Gender::Female);
    assert!(ana.can_open);
    assert!(!ana.can_decorate);
    assert!(ana.availability.contains(&DayType::Sunday));
    assert!(!ana.availability.contains(&DayType::Wednesday));
    assert_eq!(ana.forbidden_partners_raw.as_deref(), Some("Bruno"));

    let bruno = &members[1];
    assert!(bruno.can_decorate);
    assert_eq!(bruno.forbidden_roles_raw.as_deref(), Some("Portaria"));

    let carla = &members[2];
    assert!(!carla.availability.contains(&DayType::Sunday));
    assert!(carla.availability.contains(&DayType::Wednesday));

    println!("=== 测试通过 ===\n");
}

#[test]
fn test_load_members_missing_name_column() {
    let members_file = write_csv(&["Pessoa,Sexo", "Ana,F"]);

    let result = RosterImporter::new().load_members(members_file.path());
    assert!(matches!(result, Err(ImportError::MissingColumn { .. })));
}

#[test]
fn test_load_members_row_without_name() {
    let members_file = write_csv(&["Nome,Sexo", "Ana,F", ",M"]);

    let result = RosterImporter::new().load_members(members_file.path());
    assert!(matches!(result, Err(ImportError::PrimaryKeyMissing(3))));
}

#[test]
fn test_load_members_duplicate_name() {
    let members_file = write_csv(&["Nome,Sexo", "Ana,F", "Bruno,M", " Ana ,F"]);

    let result = RosterImporter::new().load_members(members_file.path());
    match result {
        Err(ImportError::DuplicateMember { row, name }) => {
            assert_eq!(row, 4);
            assert_eq!(name, "Ana");
        }
        other => panic!("期望 DuplicateMember，实际: {:?}", other.map(|m| m.len())),
    }
}

#[test]
fn test_load_rule_sheets() {
    println!("\n=== 测试：规则表导入 ===");

    let pairs = write_csv(&["Pessoa A,Pessoa B", "Ana,Bruno", "Carla,"]);
    let restrictions = write_csv(&["Membro,Função Proibida", "Ana,Frente Templo"]);
    let absences = write_csv(&[
        "Membro,Início,Fim",
        "Ana,01/03/2026,15/03/2026",
        "Bruno,2026-03-20,sem data",
    ]);

    let importer = RosterImporter::new();

    let pair_rules = importer.load_pair_rules(pairs.path()).unwrap();
    assert_eq!(pair_rules.len(), 1, "不完整的搭档行应被跳过");

    let role_restrictions = importer.load_role_restrictions(restrictions.path()).unwrap();
    assert_eq!(role_restrictions[0].role_text, "Frente Templo");

    let absence_rows = importer.load_absences(absences.path()).unwrap();
    assert_eq!(absence_rows.len(), 2);
    assert_eq!(absence_rows[0].start, Some(date(2026, 3, 1)));
    assert_eq!(absence_rows[0].end, Some(date(2026, 3, 15)));
    assert_eq!(absence_rows[1].end, None, "无法解析的日期保留为 None");

    println!("=== 测试通过 ===\n");
}

#[test]
fn test_history_sources_summed_across_files() {
    let members = write_csv(&["Nome,Sexo", "Ana,F", "Bruno,M"]);
    let history_a = write_csv(&["Nome,Santa Ceia", "Ana,2", "Bruno,"]);
    let history_b = write_csv(&["Membro,Contagem", "Ana,1", "Bruno,4"]);

    let sources = SourcePaths {
        members: members.path().to_path_buf(),
        history: vec![history_a.path().to_path_buf(), history_b.path().to_path_buf()],
        ..Default::default()
    };

    let input = RosterImporter::new().load(&sources).unwrap();
    assert_eq!(input.history.get("Ana"), 3);
    assert_eq!(input.history.get("Bruno"), 4);
    assert!(input.pair_rules.is_empty());
}

#[test]
fn test_history_invalid_count_is_fatal() {
    let history = write_csv(&["Nome,Contagem", "Ana,muitas"]);
    let result = RosterImporter::new().load_history(history.path());
    assert!(matches!(
        result,
        Err(ImportError::TypeConversionError { row: 2, .. })
    ));
}

#[test]
fn test_missing_file_reported() {
    let sources = SourcePaths {
        members: "nao_existe.csv".into(),
        ..Default::default()
    };
    let result = RosterImporter::new().load(&sources);
    assert!(matches!(result, Err(ImportError::FileNotFound(_))));
}

// ==========================================
// 测试用例 2: 配置文件 → 导入 → 排班
// ==========================================

#[test]
fn test_config_file_end_to_end() {
    println!("\n=== 测试：配置文件端到端 ===");

    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("membros.csv"),
        "Nome,Sexo,Abertura,Domingo,Quarta\n\
         Ana,F,SIM,,\n\
         Bruno,M,,,\n\
         Carla,F,,,\n\
         Davi,M,,,\n\
         Elisa,F,,,\n\
         Fabio,M,SIM,,\n\
         Gabi,F,,,\n\
         Hugo,M,,,\n",
    )
    .unwrap();
    fs::write(
        dir.path().join("historico.csv"),
        "Nome,Contagem\nAna,2\n",
    )
    .unwrap();
    fs::write(
        dir.path().join("config.json"),
        r#"{
            "run": {
                "period_start": "2026-03-01",
                "period_end": "2026-03-08",
                "communion_date": "2026-03-01"
            },
            "sources": {
                "members": "membros.csv",
                "history": ["historico.csv"]
            }
        }"#,
    )
    .unwrap();

    let config = AppConfig::load(&dir.path().join("config.json")).unwrap();
    let input = RosterImporter::new().load(&config.sources).unwrap();
    assert_eq!(input.members.len(), 8);

    let result = RosterScheduler::new(config.run)
        .unwrap()
        .run(&input)
        .unwrap();

    // 2026-03-01 周日, 03-04 周三, 03-08 周日
    let dates: Vec<_> = result.day_records.iter().map(|r| r.date).collect();
    assert_eq!(
        dates,
        vec![date(2026, 3, 1), date(2026, 3, 4), date(2026, 3, 8)]
    );
    assert_eq!(result.day_records[0].slots.len(), 5);
    assert_eq!(result.day_records[1].slots.len(), 3);

    let team = result.day_records[0].team.clone().unwrap_or_default();
    println!("  - 圣餐团队: {:?}", team);
    assert!(!team.is_empty());

    let updated = result.updated_history(&input.history);
    let team_total: u32 = team.iter().map(|n| updated.get(n) - input.history.get(n)).sum();
    assert_eq!(team_total as usize, team.len());

    println!("=== 测试通过 ===\n");
}

use super::SlotResolver;
use crate::domain::day_record::SlotAssignment;
use crate::domain::equity::EquityState;
use crate::domain::history::HistoryTable;
use crate::domain::member::Member;
use crate::domain::types::{Gender, SlotWeight};

// ==========================================
// 测试辅助函数
// ==========================================

fn members(names: &[&str]) -> Vec<Member> {
    names.iter().map(|n| Member::new(*n, Gender::Male)).collect()
}

fn equity_for(names: &[&str], history: &[(&str, u32)]) -> EquityState {
    let table: HistoryTable = history
        .iter()
        .map(|(n, c)| (n.to_string(), *c))
        .collect();
    EquityState::new(names.iter().copied(), &table)
}

// ==========================================
// 排序键测试
// ==========================================

#[test]
fn test_lowest_load_wins() {
    let roster = members(&["Ana", "Bia", "Caio"]);
    let pool: Vec<&Member> = roster.iter().collect();
    let mut equity = equity_for(&["Ana", "Bia", "Caio"], &[]);
    equity.credit("Ana", 1.0, 0);
    equity.credit("Bia", 0.5, 0);

    let resolver = SlotResolver::new();
    let winner = resolver.pick(&pool, &equity, 1).unwrap();
    assert_eq!(winner.name, "Caio");
}

#[test]
fn test_longer_rest_wins_on_equal_load() {
    let roster = members(&["Ana", "Bia"]);
    let pool: Vec<&Member> = roster.iter().collect();
    let mut equity = equity_for(&["Ana", "Bia"], &[]);
    equity.credit("Ana", 1.0, 3); // 休息 1 天
    equity.credit("Bia", 1.0, 1); // 休息 3 天

    let resolver = SlotResolver::new();
    assert_eq!(resolver.pick(&pool, &equity, 4).unwrap().name, "Bia");
}

#[test]
fn test_never_served_counts_as_most_rested() {
    let roster = members(&["Ana", "Bia"]);
    let pool: Vec<&Member> = roster.iter().collect();
    let mut equity = equity_for(&["Ana", "Bia"], &[]);
    equity.credit("Ana", 0.0, 0);

    let resolver = SlotResolver::new();
    assert_eq!(resolver.pick(&pool, &equity, 5).unwrap().name, "Bia");
}

#[test]
fn test_history_then_name_break_ties() {
    let roster = members(&["Caio", "Bia", "Ana"]);
    let pool: Vec<&Member> = roster.iter().collect();
    let equity = equity_for(&["Ana", "Bia", "Caio"], &[("Ana", 2)]);

    let resolver = SlotResolver::new();
    let sorted: Vec<&str> = resolver
        .sort(pool, &equity, 0)
        .iter()
        .map(|m| m.name.as_str())
        .collect();
    assert_eq!(sorted, vec!["Bia", "Caio", "Ana"]);
}

// ==========================================
// 状态更新测试
// ==========================================

#[test]
fn test_resolve_credits_winner() {
    let roster = members(&["Ana", "Bia"]);
    let pool: Vec<&Member> = roster.iter().collect();
    let mut equity = equity_for(&["Ana", "Bia"], &[]);

    let resolver = SlotResolver::new();
    let first = resolver.resolve(&pool, &mut equity, 2, SlotWeight::Primary);
    assert_eq!(first, SlotAssignment::Assigned("Ana".to_string()));
    assert_eq!(equity.load("Ana"), 1.0);
    assert_eq!(equity.entry("Ana").unwrap().last_served_index, Some(2));

    let second = resolver.resolve(&pool, &mut equity, 2, SlotWeight::Half);
    assert_eq!(second, SlotAssignment::Assigned("Bia".to_string()));
    assert_eq!(equity.load("Bia"), 0.5);
}

#[test]
fn test_empty_pool_is_vacant() {
    let mut equity = equity_for(&["Ana"], &[]);
    let resolver = SlotResolver::new();
    let result = resolver.resolve(&[], &mut equity, 0, SlotWeight::Primary);
    assert!(result.is_vacant());
    assert_eq!(equity.load("Ana"), 0.0);
}

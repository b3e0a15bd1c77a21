//! End-to-end use of the public surface: fields bound to a small schema,
//! predicates and comparators built from them, and navigation between
//! entities.

use fieldkit_config::Config;
use fieldkit_core::{
    ErrorClass,
    field::{ComparableField, ComparableForeignKeyField, LongForeignKeyField, collect},
    prelude::*,
};
use std::collections::HashMap;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Plan {
    Free,
    Basic,
    Pro,
    Enterprise,
}

enum_domain!(Plan, "billing::Plan", [Free, Basic, Pro, Enterprise]);

#[derive(Clone, Debug, Default)]
struct Customer {
    id: i64,
    seats: i32,
    name: Option<String>,
    plan: Option<Plan>,
    account: Option<i64>,
}

#[derive(Clone, Debug, Default)]
struct Account {
    id: i64,
    owner: Option<String>,
}

fn col(column: &str) -> ColumnIdentifier {
    ColumnIdentifier::new("customer", column)
}

fn seats() -> IntField<Customer> {
    IntField::create(
        col("seats"),
        |c: &Customer| c.seats,
        |c: &mut Customer, v| c.seats = v,
        IdentityMapper,
        false,
    )
}

fn name() -> StringField<Customer> {
    StringField::create(
        col("name"),
        |c: &Customer| c.name.as_ref(),
        |c: &mut Customer, v| c.name = v,
        IdentityMapper,
        false,
    )
}

fn plan() -> EnumField<Customer, Plan, Plan> {
    EnumField::create(
        col("plan"),
        |c: &Customer| c.plan.as_ref(),
        |c: &mut Customer, v| c.plan = v,
        IdentityMapper,
        false,
    )
}

fn customer_id() -> LongField<Customer> {
    LongField::create(
        col("id"),
        |c: &Customer| c.id,
        |c: &mut Customer, v| c.id = v,
        IdentityMapper,
        true,
    )
}

fn account_id() -> LongField<Account> {
    LongField::create(
        ColumnIdentifier::new("account", "id"),
        |a: &Account| a.id,
        |a: &mut Account, v| a.id = v,
        IdentityMapper,
        true,
    )
}

fn customer(id: i64, seats: i32, name: &str, plan: Option<Plan>) -> Customer {
    Customer {
        id,
        seats,
        name: Some(name.to_string()),
        plan,
        account: None,
    }
}

fn roster() -> Vec<Customer> {
    vec![
        customer(1, 2, "abcdef", Some(Plan::Free)),
        customer(2, 4, "xyzAB", Some(Plan::Pro)),
        customer(3, 5, "Abacus", Some(Plan::Enterprise)),
        customer(4, 4, "zeta", None),
    ]
}

fn ids<'a>(customers: impl IntoIterator<Item = &'a Customer>) -> Vec<i64> {
    customers.into_iter().map(|c| c.id).collect()
}

#[test]
fn between_is_half_open_when_requested() {
    let window = seats().between(2, 5, Inclusion::StartInclusiveEndExclusive);
    let matched: Vec<i32> = [1, 2, 4, 5]
        .into_iter()
        .filter(|&s| {
            window.test(&Customer {
                seats: s,
                ..Customer::default()
            })
        })
        .collect();

    assert_eq!(matched, vec![2, 4]);
}

#[test]
fn starts_with_ignore_case_folds_both_sides() {
    let pred = name().starts_with_ignore_case("AB");
    let roster = roster();

    assert_eq!(ids(roster.iter().filter(|c| pred.test(c))), vec![1, 3]);
    assert!(!pred.test(&Customer::default()));
}

#[test]
fn configured_case_fold_reaches_string_fields() {
    let config = Config::from_toml_str("[text]\ncase_fold = \"ascii\"\n").unwrap();
    let ascii = name().with_config(&config);
    let unicode = name().with_config(&Config::default());
    let ecole = Customer {
        name: Some("école".to_string()),
        ..Customer::default()
    };

    assert!(unicode.equal_ignore_case("ÉCOLE").test(&ecole));
    assert!(!ascii.equal_ignore_case("ÉCOLE").test(&ecole));
}

#[test]
fn enum_ranges_collapse_over_the_domain() {
    let upper = plan().greater_than(Plan::Basic);
    assert_eq!(upper.predicate_type(), PredicateType::In);
    assert_eq!(upper.operands().len(), 2);

    let top = plan().greater_or_equal(Plan::Enterprise);
    assert_eq!(top.predicate_type(), PredicateType::Equal);

    let none = plan().greater_than(Plan::Enterprise);
    assert_eq!(none.predicate_type(), PredicateType::AlwaysFalse);

    let roster = roster();
    assert_eq!(ids(roster.iter().filter(|c| upper.test(c))), vec![2, 3]);
}

#[test]
fn filter_and_sort_with_one_schema() {
    let filter = seats().greater_or_equal(4) & !plan().equal(Plan::Pro);
    let order = seats().comparator().reversed().then(name().comparator());

    let mut picked: Vec<Customer> = roster().into_iter().filter(|c| filter.test(c)).collect();
    order.sort(&mut picked);

    assert_eq!(ids(&picked), vec![3, 4]);
}

#[test]
fn foreign_key_navigates_both_ways() {
    let fk: ComparableForeignKeyField<Customer, Account, i64, i64, i64> = ForeignKeyField::new(
        ComparableField::create(
            col("account"),
            |c: &Customer| c.account.as_ref(),
            |c: &mut Customer, v| c.account = v,
            IdentityMapper,
            false,
        ),
        ComparableField::create(
            ColumnIdentifier::new("account", "id"),
            |a: &Account| Some(&a.id),
            |a: &mut Account, v: Option<i64>| a.id = v.unwrap_or_default(),
            IdentityMapper,
            true,
        ),
    );
    let accounts = vec![
        Account {
            id: 10,
            owner: Some("ops".into()),
        },
        Account { id: 20, owner: None },
    ];
    let mut customers = roster();
    customers[0].account = Some(20);
    customers[2].account = Some(20);

    let found = fk.finder(&accounts).find(&customers[0]).unwrap();
    assert_eq!(found.id, 20);
    assert!(found.owner.is_none());
    assert!(fk.finder(&accounts).find(&customers[1]).is_none());

    let back = fk.backward_finder(&customers);
    assert_eq!(ids(back.find(&accounts[1])), vec![1, 3]);
    assert_eq!(back.find(&accounts[0]).count(), 0);

    let refs = fk.references(&accounts[1]);
    assert_eq!(ids(customers.iter().filter(|c| refs.test(c))), vec![1, 3]);
}

#[test]
fn primitive_foreign_key_finds_by_value() {
    let fk: LongForeignKeyField<Customer, Account> = ForeignKeyField::new(customer_id(), account_id());
    let accounts = vec![Account { id: 3, owner: None }];

    assert_eq!(fk.referenced_field().identifier().to_string(), "account.id");
    assert!(fk.finder(&accounts).find(&roster()[2]).is_some());
    assert!(fk.finder(&accounts).find(&roster()[0]).is_none());
}

#[test]
fn fingerprints_key_a_compiled_cache() {
    let mut cache: HashMap<[u8; 32], &str> = HashMap::new();
    cache.insert(seats().less_than(3).and(name().is_null()).fingerprint(), "small-anon");

    let rebuilt = seats().less_than(3).and(name().is_null());
    assert_eq!(cache.get(&rebuilt.fingerprint()), Some(&"small-anon"));
    assert!(!cache.contains_key(&seats().less_than(4).and(name().is_null()).fingerprint()));
}

#[test]
fn keyed_collection_rejects_duplicates() {
    let err = collect::to_map(&seats(), roster()).unwrap_err();
    assert_eq!(err.class, ErrorClass::DuplicateKey);
    assert!(err.message.contains('4'));

    let by_plan = collect::group_by(&plan(), roster());
    assert_eq!(by_plan.len(), 4);
    assert_eq!(by_plan.get(&Value::Null).map(Vec::len), Some(1));
}

#[test]
fn built_values_are_shareable_across_threads() {
    let pred = name().contains_ignore_case("a") | seats().equal(0);
    let order = Comparator::from(name().comparator());
    let roster = roster();

    let counts: Vec<usize> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| roster.iter().filter(|c| pred.test(c)).count()))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert!(counts.iter().all(|&n| n == 4));
    assert_eq!(order.parts().len(), 1);
}

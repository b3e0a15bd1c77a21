use super::*;
use crate::{
    column::{FnMapper, IdentityMapper},
    error::ErrorClass,
    expr::EnumDomain,
    predicate::{FieldPredicate, Operand, PredicateType},
};
use fieldkit_primitives::{CaseFold, Inclusion};
use rust_decimal::Decimal;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Tier {
    Bronze,
    Silver,
    Gold,
    Platinum,
}

crate::enum_domain!(Tier, "crm::Tier", [Bronze, Silver, Gold, Platinum]);

#[derive(Clone, Debug, Default)]
struct Person {
    id: i64,
    age: i32,
    limit: i32,
    name: Option<String>,
    tier: Option<Tier>,
    balance: Option<Decimal>,
    team: Option<i64>,
}

#[derive(Clone, Debug)]
struct Team {
    id: Option<i64>,
    title: String,
}

fn col(column: &str) -> ColumnIdentifier {
    ColumnIdentifier::new("person", column)
}

fn id_field() -> LongField<Person> {
    LongField::create(col("id"), |p: &Person| p.id, |p: &mut Person, v| p.id = v, IdentityMapper, true)
}

fn age_field() -> IntField<Person> {
    IntField::create(col("age"), |p: &Person| p.age, |p: &mut Person, v| p.age = v, IdentityMapper, false)
}

fn limit_field() -> IntField<Person> {
    IntField::create(
        col("limit"),
        |p: &Person| p.limit,
        |p: &mut Person, v| p.limit = v,
        IdentityMapper,
        false,
    )
}

fn name_field() -> StringField<Person> {
    StringField::create(
        col("name"),
        |p: &Person| p.name.as_ref(),
        |p: &mut Person, v| p.name = v,
        IdentityMapper,
        false,
    )
}

fn tier_field() -> EnumField<Person, Tier, Tier> {
    EnumField::create(
        col("tier"),
        |p: &Person| p.tier.as_ref(),
        |p: &mut Person, v| p.tier = v,
        IdentityMapper,
        false,
    )
}

fn balance_field() -> DecimalField<Person> {
    DecimalField::create(
        col("balance"),
        |p: &Person| p.balance.as_ref(),
        |p: &mut Person, v| p.balance = v,
        IdentityMapper,
        false,
    )
}

fn person(age: i32, name: Option<&str>) -> Person {
    Person {
        age,
        name: name.map(str::to_string),
        ..Person::default()
    }
}

fn with_tier(tier: Option<Tier>) -> Person {
    Person {
        tier,
        ..Person::default()
    }
}

fn values(predicate: &FieldPredicate<Person>) -> Vec<Value> {
    predicate
        .operands()
        .iter()
        .filter_map(Operand::as_value)
        .cloned()
        .collect()
}

//
// primitive fields
//

#[test]
fn primitive_field_reports_structure() {
    let age = age_field();

    assert_eq!(age.kind(), ExpressionKind::Int);
    assert_eq!(age.identifier().to_string(), "person.age");
    assert!(!age.is_unique());
    assert!(id_field().is_unique());
    assert_eq!(age.value_of(&person(30, None)), Value::Int(30));
}

#[test]
fn primitive_field_get_set_and_stored_mapping() {
    let cents = FnMapper::new("cents", |c: i64| c / 100, |d: i64| d * 100);
    let id = LongField::<Person, i64>::create(
        col("id"),
        |p: &Person| p.id,
        |p: &mut Person, v| p.id = v,
        cents,
        false,
    );

    let mut p = Person::default();
    id.set(&mut p, 7);
    assert_eq!(id.get(&p), 7);
    assert_eq!(id.get_stored(&p), 700);

    id.set_stored(&mut p, 1_200);
    assert_eq!(p.id, 12);
    assert_eq!(id.type_mapper().label(), "cents");
}

#[test]
fn primitive_expression_reads_the_column() {
    let expr = age_field().expression();

    assert_eq!(expr.apply_as_int(&person(41, None)), 41);
}

#[test]
fn ordering_predicates_on_primitive() {
    let age = age_field();
    let p = person(30, None);

    assert!(age.equal(30).test(&p));
    assert!(!age.not_equal(30).test(&p));
    assert!(age.less_than(31).test(&p));
    assert!(!age.less_than(30).test(&p));
    assert!(age.less_or_equal(30).test(&p));
    assert!(age.greater_than(29).test(&p));
    assert!(age.greater_or_equal(30).test(&p));
    assert!(!age.greater_or_equal(31).test(&p));
}

#[test]
fn between_honours_inclusion() {
    let age = age_field();
    let half_open = age.between(2, 5, Inclusion::StartInclusiveEndExclusive);

    assert!(half_open.test(&person(2, None)));
    assert!(half_open.test(&person(4, None)));
    assert!(!half_open.test(&person(5, None)));
    assert_eq!(half_open.inclusion(), Some(Inclusion::StartInclusiveEndExclusive));
    assert_eq!(values(&half_open), vec![Value::Int(2), Value::Int(5)]);

    let open = age.between(2, 5, Inclusion::StartExclusiveEndExclusive);
    assert!(!open.test(&person(2, None)));

    let closed = age.between(2, 5, Inclusion::StartInclusiveEndInclusive);
    assert!(closed.test(&person(5, None)));

    let outside = age.not_between(2, 5, Inclusion::StartInclusiveEndExclusive);
    assert!(outside.test(&person(5, None)));
    assert_eq!(outside.predicate_type(), PredicateType::NotBetween);
}

#[test]
fn membership_predicates() {
    let age = age_field();
    let pred = age.in_([18, 21, 65]);

    assert!(pred.test(&person(21, None)));
    assert!(!pred.test(&person(22, None)));
    assert_eq!(pred.operands().len(), 3);

    let not_in = age.not_in([18, 21]);
    assert!(not_in.test(&person(30, None)));
    assert_eq!(not_in.predicate_type(), PredicateType::NotIn);
}

#[test]
fn field_to_field_comparison() {
    let (age, limit) = (age_field(), limit_field());
    let within = Person {
        age: 20,
        limit: 30,
        ..Person::default()
    };

    assert!(age.compare_field(PredicateType::LessThan, &limit).unwrap().test(&within));
    assert!(!age.equal_field(&limit).test(&within));
    assert!(age.compare_field(PredicateType::NotEqual, &limit).unwrap().test(&within));

    let pred = age.equal_field(&limit);
    assert_eq!(pred.operand(), Some(&Operand::Field(limit.info().clone())));
}

#[test]
fn compare_field_rejects_non_binary_types() {
    let err = age_field()
        .compare_field(PredicateType::Between, &limit_field())
        .unwrap_err();

    assert_eq!(err.class, ErrorClass::InvalidArgument);
    assert_eq!(err.origin, crate::ErrorOrigin::Predicate);
}

//
// nullable fields
//

#[test]
fn predicates_on_absent_are_false_and_negations_true() {
    let name = name_field();
    let nobody = person(1, None);

    assert!(!name.equal("ann").test(&nobody));
    assert!(name.not_equal("ann").test(&nobody));
    assert!(!name.greater_than("a").test(&nobody));
    assert!(!name.in_(["ann", "bob"]).test(&nobody));
    assert!(name.not_in(["ann", "bob"]).test(&nobody));
    assert!(name.is_null().test(&nobody));
    assert!(!name.is_not_null().test(&nobody));
}

#[test]
fn string_field_value_and_expression() {
    let name = name_field();
    let ann = person(1, Some("ann"));

    assert_eq!(name.kind(), ExpressionKind::StringNullable);
    assert_eq!(name.value_of(&ann), Value::Text("ann".into()));
    assert_eq!(name.value_of(&person(1, None)), Value::Null);
    assert_eq!(name.expression().apply(&ann).as_deref(), Some("ann"));
    assert!(name.expression().is_null(&person(1, None)));
}

#[test]
fn text_predicates() {
    let name = name_field();
    let p = person(1, Some("abcdef"));

    assert!(name.starts_with("abc").test(&p));
    assert!(!name.starts_with("ABC").test(&p));
    assert!(name.ends_with("def").test(&p));
    assert!(name.contains("cd").test(&p));
    assert!(name.not_contains("zz").test(&p));
    assert!(name.contains_ignore_case("CD").test(&p));
    assert!(name.ends_with_ignore_case("DEF").test(&p));
    assert!(name.equal_ignore_case("ABCDEF").test(&p));
    assert!(name.not_equal_ignore_case("abc").test(&p));
}

#[test]
fn starts_with_ignore_case_matches_prefix_only() {
    let pred = name_field().starts_with_ignore_case("AB");

    assert!(pred.test(&person(1, Some("abcdef"))));
    assert!(!pred.test(&person(1, Some("xyzAB"))));
    assert!(!pred.test(&person(1, None)));
    assert!(name_field().not_starts_with_ignore_case("AB").test(&person(1, None)));
}

#[test]
fn text_predicate_operand_is_the_unfolded_needle() {
    let pred = name_field().contains_ignore_case("MiXeD");

    assert_eq!(values(&pred), vec![Value::Text("MiXeD".into())]);
}

#[test]
fn case_fold_is_configurable_per_field() {
    let unicode = name_field();
    let ascii = name_field().with_case_fold(CaseFold::Ascii);
    let p = person(1, Some("ÉCOLE"));

    assert!(unicode.equal_ignore_case("école").test(&p));
    assert!(!ascii.equal_ignore_case("école").test(&p));
    assert!(ascii.equal_ignore_case("École").test(&p));
}

#[test]
fn empty_string_predicates() {
    let name = name_field();

    assert!(name.is_empty().test(&person(1, Some(""))));
    assert!(!name.is_empty().test(&person(1, None)));
    assert!(name.is_not_empty().test(&person(1, None)));
    assert!(name.is_not_empty().test(&person(1, Some("x"))));
}

#[test]
fn decimal_field_orders_numerically() {
    let balance = balance_field();
    let rich = Person {
        balance: Some(Decimal::new(1_050, 2)),
        ..Person::default()
    };

    assert_eq!(balance.kind(), ExpressionKind::BigDecimalNullable);
    assert!(balance.greater_than(Decimal::new(10, 0)).test(&rich));
    assert!(balance.equal(Decimal::new(105, 1)).test(&rich));
    assert!(!balance.greater_than(Decimal::ZERO).test(&Person::default()));
}

#[test]
fn reference_field_tests_presence_only() {
    let tags: ReferenceField<Person, String, String> = ReferenceField::create(
        col("name"),
        |p: &Person| p.name.as_ref(),
        |p: &mut Person, v| p.name = v,
        IdentityMapper,
        false,
    );

    assert_eq!(tags.kind(), ExpressionKind::ReferenceNullable);
    assert!(tags.is_null().test(&person(1, None)));
    assert!(tags.is_not_null().test(&person(1, Some("x"))));

    let mut p = person(1, None);
    tags.set_stored(&mut p, Some("stored".into()));
    assert_eq!(tags.get(&p).map(String::as_str), Some("stored"));
    assert_eq!(tags.get_stored(&p).as_deref(), Some("stored"));
}

//
// enum fields
//

#[test]
fn enum_equal_is_never_collapsed() {
    let pred = tier_field().equal(Tier::Gold);

    assert_eq!(pred.predicate_type(), PredicateType::Equal);
    assert!(pred.test(&with_tier(Some(Tier::Gold))));
    assert!(!pred.test(&with_tier(None)));
}

#[test]
fn enum_range_collapses_to_smallest_shape() {
    let tier = tier_field();

    let none = tier.less_than(Tier::Bronze);
    assert_eq!(none.predicate_type(), PredicateType::AlwaysFalse);
    assert!(!none.test(&with_tier(Some(Tier::Bronze))));

    let one = tier.less_than(Tier::Silver);
    assert_eq!(one.predicate_type(), PredicateType::Equal);
    assert_eq!(values(&one), vec![Tier::Bronze.to_value()]);

    let many = tier.greater_or_equal(Tier::Silver);
    assert_eq!(many.predicate_type(), PredicateType::In);
    assert_eq!(
        values(&many),
        vec![Tier::Silver.to_value(), Tier::Gold.to_value(), Tier::Platinum.to_value()]
    );
    assert!(many.test(&with_tier(Some(Tier::Platinum))));
    assert!(!many.test(&with_tier(Some(Tier::Bronze))));
    assert!(!many.test(&with_tier(None)));
}

#[test]
fn enum_negated_family_reports_complements() {
    let tier = tier_field();

    let all = tier.not_between(Tier::Gold, Tier::Silver, Inclusion::StartInclusiveEndInclusive);
    assert_eq!(all.predicate_type(), PredicateType::AlwaysTrue);
    assert!(all.test(&with_tier(None)));

    let not_one = tier.not_in([Tier::Gold]);
    assert_eq!(not_one.predicate_type(), PredicateType::NotEqual);

    let not_many = tier.not_in([Tier::Gold, Tier::Bronze]);
    assert_eq!(not_many.predicate_type(), PredicateType::NotIn);
    assert!(not_many.test(&with_tier(Some(Tier::Silver))));
}

#[test]
fn enum_in_collapses_by_size() {
    let tier = tier_field();

    assert_eq!(tier.in_([]).predicate_type(), PredicateType::AlwaysFalse);
    assert_eq!(tier.in_([Tier::Gold]).predicate_type(), PredicateType::Equal);
    assert_eq!(
        tier.in_([Tier::Platinum, Tier::Bronze]).predicate_type(),
        PredicateType::In
    );
}

#[test]
fn enum_between_follows_ordinals() {
    let pred = tier_field().between(Tier::Silver, Tier::Platinum, Inclusion::StartExclusiveEndInclusive);

    assert_eq!(pred.predicate_type(), PredicateType::In);
    assert!(pred.test(&with_tier(Some(Tier::Gold))));
    assert!(!pred.test(&with_tier(Some(Tier::Silver))));
}

#[test]
fn enum_comparator_orders_by_ordinal() {
    let mut people = vec![
        with_tier(Some(Tier::Gold)),
        with_tier(None),
        with_tier(Some(Tier::Bronze)),
    ];
    tier_field().comparator().sort(&mut people);

    let tiers: Vec<_> = people.iter().map(|p| p.tier).collect();
    assert_eq!(tiers, vec![Some(Tier::Bronze), Some(Tier::Gold), None]);
}

//
// foreign keys
//

fn team_fk() -> LongForeignKeyField<Person, Team> {
    ForeignKeyField::new(
        LongField::create(
            col("team"),
            |p: &Person| p.team.unwrap_or(-1),
            |p: &mut Person, v| p.team = Some(v),
            IdentityMapper,
            false,
        ),
        LongField::create(
            ColumnIdentifier::new("team", "id"),
            |t: &Team| t.id.unwrap_or(-2),
            |t: &mut Team, v| t.id = Some(v),
            IdentityMapper,
            true,
        ),
    )
}

fn teams() -> Vec<Team> {
    vec![
        Team {
            id: Some(1),
            title: "red".into(),
        },
        Team {
            id: Some(2),
            title: "blue".into(),
        },
    ]
}

fn member(id: i64, team: Option<i64>) -> Person {
    Person {
        id,
        team,
        ..Person::default()
    }
}

#[test]
fn foreign_key_finds_referenced_entity() {
    let fk = team_fk();
    let teams = teams();
    let finder = fk.finder(&teams);

    assert_eq!(finder.find(&member(1, Some(2))).map(|t| t.title.as_str()), Some("blue"));
    assert!(finder.find(&member(1, Some(9))).is_none());
    assert_eq!(finder.referenced().identifier.to_string(), "team.id");
}

#[test]
fn foreign_key_navigates_backwards() {
    let fk = team_fk();
    let people = vec![member(1, Some(1)), member(2, Some(2)), member(3, Some(1))];
    let backwards = fk.backward_finder(&people);
    let teams = teams();
    let red = &teams[0];

    let ids: Vec<i64> = backwards.find(red).map(|p| p.id).collect();
    assert_eq!(ids, vec![1, 3]);
}

#[test]
fn foreign_key_derefs_to_local_field() {
    let fk = team_fk();

    assert_eq!(fk.identifier().to_string(), "person.team");
    assert!(fk.equal(1_i64).test(&member(1, Some(1))));
    assert!(fk.referenced_field().is_unique());
}

#[test]
fn references_builds_equality_from_foreign_value() {
    let fk = team_fk();
    let pred = fk.references(&teams()[1]);

    assert_eq!(pred.predicate_type(), PredicateType::Equal);
    assert!(pred.test(&member(1, Some(2))));
    assert!(!pred.test(&member(1, Some(1))));
}

#[test]
fn nullable_foreign_key_never_matches_absent() {
    let local = ComparableField::create(
        col("team"),
        |p: &Person| p.team.as_ref(),
        |p: &mut Person, v| p.team = v,
        IdentityMapper,
        false,
    );
    let remote = ComparableField::create(
        ColumnIdentifier::new("team", "id"),
        |t: &Team| t.id.as_ref(),
        |t: &mut Team, v| t.id = v,
        IdentityMapper,
        true,
    );
    let fk: ComparableForeignKeyField<Person, Team, i64, i64, i64> = ForeignKeyField::new(local, remote);
    let orphan_team = Team {
        id: None,
        title: "none".into(),
    };
    let teams = vec![orphan_team.clone()];

    assert!(fk.finder(&teams).find(&member(1, None)).is_none());

    let pred = fk.references(&orphan_team);
    assert!(!pred.test(&member(1, None)));
    assert_eq!(pred.operand(), Some(&Operand::Value(Value::Null)));
}

#[test]
fn enum_foreign_key_matches_by_constant() {
    #[derive(Clone, Debug)]
    struct Grade {
        tier: Option<Tier>,
    }

    let fk: EnumForeignKeyField<Person, Grade, Tier, Tier, Tier> = ForeignKeyField::new(
        tier_field(),
        EnumField::create(
            ColumnIdentifier::new("grade", "tier"),
            |g: &Grade| g.tier.as_ref(),
            |g: &mut Grade, v| g.tier = v,
            IdentityMapper,
            true,
        ),
    );
    let grades = vec![
        Grade {
            tier: Some(Tier::Silver),
        },
        Grade {
            tier: Some(Tier::Gold),
        },
    ];

    let found = fk.finder(&grades).find(&with_tier(Some(Tier::Gold)));
    assert_eq!(found.and_then(|g| g.tier), Some(Tier::Gold));
    assert!(fk.references(&grades[0]).test(&with_tier(Some(Tier::Silver))));
}

//
// collect
//

#[test]
fn to_map_rejects_duplicate_keys() {
    let people = vec![person(30, Some("a")), person(30, Some("b"))];
    let err = collect::to_map(&age_field(), people).unwrap_err();

    assert_eq!(err.class, ErrorClass::DuplicateKey);
    assert!(err.message.contains("30"));
}

#[test]
fn to_map_keys_by_value() {
    let people = vec![person(30, Some("a")), person(40, Some("b"))];
    let map = collect::to_map(&age_field(), people).unwrap();

    assert_eq!(map.len(), 2);
    assert_eq!(map[&Value::Int(40)].name.as_deref(), Some("b"));
}

#[test]
fn to_map_merging_resolves_collisions() {
    let people = vec![person(30, Some("a")), person(30, Some("b")), person(31, None)];
    let map = collect::to_map_merging(&age_field(), people, |first, _| first);

    assert_eq!(map.len(), 2);
    assert_eq!(map[&Value::Int(30)].name.as_deref(), Some("a"));
}

#[test]
fn group_by_keeps_absent_values_under_null() {
    let people = vec![person(1, Some("a")), person(2, None), person(3, Some("a"))];
    let groups = collect::group_by(&name_field(), people);

    let ages: Vec<i32> = groups[&Value::Text("a".into())].iter().map(|p| p.age).collect();
    assert_eq!(ages, vec![1, 3]);
    assert_eq!(groups[&Value::Null].len(), 1);
}

#[test]
fn collect_accepts_trait_objects() {
    let field: Box<dyn Field<Person>> = Box::new(tier_field());
    let people = vec![with_tier(Some(Tier::Gold)), with_tier(Some(Tier::Gold))];

    assert_eq!(collect::group_by(field.as_ref(), people).len(), 1);
}

#[test]
fn field_info_serializes_kind_as_label() {
    let info = age_field().info().clone();
    let json = serde_json::to_value(&info).unwrap();

    assert_eq!(json["kind"], "int");
    let back: FieldInfo = serde_json::from_value(json).unwrap();
    assert_eq!(back, info);
}

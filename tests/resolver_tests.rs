//! Identity resolution over loaded salary and projection files.

use lineforge::adapter::outbound::csv::{
    read_overrides, read_projections, read_salaries, write_overrides,
};
use lineforge::application::{IdentityResolver, ManualOverrides, MatchSource};
use lineforge::config::ResolverConfig;
use lineforge::domain::{NormalizedName, PlayerId, PricedPlayer, ProjectedPlayer, ScoringRules};
use lineforge::error::DataSource;

const SALARIES: &str = "\
Position,Name,ID,Salary,TeamAbbrev
QB,Patrick Mahomes II,1,8000,KC
WR,D.J. Moore,2,6600,CHI
WR,Hollywood Brown,3,5200,KC
WR,Michael Pittman Jr.,4,5900,IND
TE,Travis Kelce,5,7000,KC
DST,Bills ,6,3200,BUF
";

const PROJECTIONS: &str = "\
name,position,team,projection
Patrick Mahomes,QB,KC,23.4
DJ Moore,WR,CHI,15.1
Marquise Brown,WR,KC,11.0
Michael Pittman,WR,IND,14.2
Travis Kelce,TE,KC,13.8
Buffalo Bills,DST,BUF,8.5
";

fn load() -> (Vec<PricedPlayer>, Vec<ProjectedPlayer>) {
    let priced = read_salaries(SALARIES.as_bytes()).unwrap().records;
    let projected = read_projections(
        PROJECTIONS.as_bytes(),
        DataSource::PrimaryProjections,
        &ScoringRules::draftkings(),
    )
    .unwrap()
    .records;
    (priced, projected)
}

fn resolver() -> IdentityResolver {
    IdentityResolver::new(ResolverConfig::default())
}

#[test]
fn suffixes_and_punctuation_resolve() {
    let (priced, projected) = load();
    let result = resolver().resolve(&priced, &projected, &ManualOverrides::new());

    let moore = result.link(PlayerId::new(1)).unwrap();
    assert_eq!(moore.source, MatchSource::Exact);
    let mahomes = result.link(PlayerId::new(0)).unwrap();
    assert_eq!(mahomes.projected.as_str(), "patrickmahomes");
    assert!(result.link(PlayerId::new(5)).is_some(), "defense should match");
    assert_eq!(result.unresolved.len(), 1);
    assert_eq!(result.unresolved[0].name, "Hollywood Brown");
}

#[test]
fn override_file_fills_the_gap() {
    let (priced, projected) = load();
    let csv = "dfs_name,projection_name\nHollywood Brown,Marquise Brown\n";
    let overrides: ManualOverrides = read_overrides(csv.as_bytes())
        .unwrap()
        .records
        .into_iter()
        .collect();

    let result = resolver().resolve(&priced, &projected, &overrides);
    assert!(result.unresolved.is_empty());
    let brown = result
        .resolved
        .iter()
        .find(|p| p.id == PlayerId::new(2))
        .unwrap();
    assert_eq!(brown.matched, NormalizedName::new("Marquise Brown"));
    assert_eq!(brown.projection.to_string(), "11.0");
    assert_eq!(brown.salary, 5200);
}

#[test]
fn saved_overrides_reload_identically() {
    let overrides = ManualOverrides::from([
        (NormalizedName::new("Hollywood Brown"), NormalizedName::new("Marquise Brown")),
        (NormalizedName::new("Gabe Davis"), NormalizedName::new("Gabriel Davis")),
    ]);
    let mut buf = Vec::new();
    write_overrides(&mut buf, &overrides).unwrap();
    let reloaded: ManualOverrides = read_overrides(buf.as_slice())
        .unwrap()
        .records
        .into_iter()
        .collect();
    assert_eq!(reloaded, overrides);
}

#[test]
fn pricing_source_owns_position_team_and_salary() {
    let (priced, projected) = load();
    let result = resolver().resolve(&priced, &projected, &ManualOverrides::new());
    for player in &result.resolved {
        let source = priced.iter().find(|p| p.id == player.id).unwrap();
        assert_eq!(player.position, source.position);
        assert_eq!(player.team, source.team);
        assert_eq!(player.salary, source.salary);
    }
}

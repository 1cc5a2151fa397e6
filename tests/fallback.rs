// tests/fallback.rs
use sector_news_feed::fallback::fallback_news;
use sector_news_feed::sector::CONCRETE_SECTORS;
use sector_news_feed::Sector;

#[test]
fn all_returns_five_in_fixed_order() {
    let v = fallback_news(Sector::All);
    assert_eq!(v.len(), 5);
    let sectors: Vec<Sector> = v.iter().map(|n| n.sector).collect();
    assert_eq!(
        sectors,
        vec![
            Sector::Ai,
            Sector::Energy,
            Sector::Space,
            Sector::Robotics,
            Sector::NuclearFusion
        ]
    );
}

#[test]
fn chips_is_union_of_chips_and_ai() {
    let v = fallback_news(Sector::Chips);
    assert!(!v.is_empty());
    assert!(v
        .iter()
        .all(|n| n.sector == Sector::Chips || n.sector == Sector::Ai));
    assert_eq!(v[0].title, "NVIDIA, 차세대 AI 칩 블랙웰 생산 가속화");
}

#[test]
fn sectors_without_items_give_empty_list() {
    assert!(fallback_news(Sector::BigTech).is_empty());
    assert!(fallback_news(Sector::DataCenter).is_empty());
}

#[test]
fn every_item_is_concrete_and_filter_is_exact() {
    for s in CONCRETE_SECTORS {
        for n in fallback_news(s) {
            assert_ne!(n.sector, Sector::All);
            if s != Sector::Chips {
                assert_eq!(n.sector, s);
            }
        }
    }
}

#[test]
fn energy_is_the_small_reactor_story() {
    let v = fallback_news(Sector::Energy);
    assert_eq!(v.len(), 1);
    assert_eq!(v[0].title, "MS, 데이터센터용 소형 원자로 계약 체결");
    assert_eq!(v[0].url, "https://techcrunch.com");
}

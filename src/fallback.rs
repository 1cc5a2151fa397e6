//! # Fallback Data Source
//! Hard-coded news used whenever the remote source fails.
//!
//! Five items across five sectors. `ALL` returns everything in fixed order;
//! a concrete sector returns its own items, except that `Chips` also matches
//! `AI` items. An empty result is valid.

use crate::model::NewsItem;
use crate::sector::Sector;

struct Seed {
    id: &'static str,
    title: &'static str,
    sector: Sector,
    summary: &'static str,
    source: &'static str,
    date: &'static str,
    url: &'static str,
    image_url: &'static str,
}

const SEEDS: [Seed; 5] = [
    Seed {
        id: "1",
        title: "NVIDIA, 차세대 AI 칩 블랙웰 생산 가속화",
        sector: Sector::Ai,
        summary: "생산 수율 문제가 해결되면서 데이터센터 수요에 맞춘 대규모 공급이 시작될 전망입니다. 주가에 긍정적 영향이 기대됩니다.",
        source: "Bloomberg",
        date: "1시간 전",
        url: "https://www.bloomberg.com",
        image_url: "https://picsum.photos/seed/ai1/800/600",
    },
    Seed {
        id: "2",
        title: "MS, 데이터센터용 소형 원자로 계약 체결",
        sector: Sector::Energy,
        summary: "AI 구동을 위한 막대한 전력 수요를 충당하기 위해 원자력 에너지 스타트업과 장기 공급 계약을 맺었습니다.",
        source: "TechCrunch",
        date: "3시간 전",
        url: "https://techcrunch.com",
        image_url: "https://picsum.photos/seed/energy1/800/600",
    },
    Seed {
        id: "3",
        title: "스페이스X, 스타십 6차 비행 성공적",
        sector: Sector::Space,
        summary: "재사용 로켓 기술의 완성도가 높아지며 우주 인터넷망 구축 비용이 획기적으로 절감될 것으로 보입니다.",
        source: "SpaceNews",
        date: "5시간 전",
        url: "https://spacenews.com",
        image_url: "https://picsum.photos/seed/space1/800/600",
    },
    Seed {
        id: "4",
        title: "휴머노이드 로봇, 테슬라 공장 투입 임박",
        sector: Sector::Robotics,
        summary: "옵티머스 로봇이 실제 생산 라인에서 단순 반복 작업을 수행하는 테스트를 통과했습니다.",
        source: "Reuters",
        date: "12시간 전",
        url: "https://www.reuters.com",
        image_url: "https://picsum.photos/seed/robot1/800/600",
    },
    Seed {
        id: "5",
        title: "핵융합 발전, 상용화 시점 5년 앞당겨진다",
        sector: Sector::NuclearFusion,
        summary: "새로운 초전도체 기술 적용으로 플라즈마 유지 시간이 획기적으로 늘어났습니다.",
        source: "ScienceDaily",
        date: "1일 전",
        url: "https://www.sciencedaily.com",
        image_url: "https://picsum.photos/seed/nuclear1/800/600",
    },
];

impl Seed {
    fn to_item(&self) -> NewsItem {
        NewsItem {
            id: self.id.to_string(),
            title: self.title.to_string(),
            sector: self.sector,
            summary: self.summary.to_string(),
            source: self.source.to_string(),
            date: self.date.to_string(),
            url: self.url.to_string(),
            image_url: self.image_url.to_string(),
        }
    }
}

fn matches(requested: Sector, item: Sector) -> bool {
    requested.is_all() || item == requested || (requested == Sector::Chips && item == Sector::Ai)
}

/// Fallback items for `sector`, in fixed source order.
pub fn fallback_news(sector: Sector) -> Vec<NewsItem> {
    SEEDS
        .iter()
        .filter(|s| matches(sector, s.sector))
        .map(Seed::to_item)
        .collect()
}

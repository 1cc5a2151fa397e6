//! Sponsored cards injected into the feed.

use crate::model::AdItem;

/// Inject one ad after every `AD_FREQUENCY` news items.
pub const AD_FREQUENCY: usize = 5;

pub static SAMPLE_ADS: [AdItem; 2] = [
    AdItem {
        title: "시네마틱 퀄리티로 완성하는 3D 캐릭터",
        description: "현직 아티스트 김경수가 알려주는 블렌더 캐릭터 모델링의 정수. 지금 바로 시작하세요.",
        cta_text: "Visit Site",
        sponsor: "Coloso",
        image_url: "https://picsum.photos/seed/ad1/800/600",
    },
    AdItem {
        title: "차세대 AI 반도체 투자 전략",
        description: "급변하는 시장 속에서 놓치지 말아야 할 핵심 밸류체인 분석 리포트를 무료로 받아보세요.",
        cta_text: "Learn More",
        sponsor: "FutureVest",
        image_url: "https://picsum.photos/seed/ad2/800/600",
    },
];

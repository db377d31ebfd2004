use crate::models::MenuItem;

pub const DEFAULT_VIDEO_URL: &str = "https://www.youtube.com/watch?v=JrWHG4mBdcQ";

pub const VIDEO_CAPTION: &str = "※ AI와 윤리, 스마트 기술이 어떻게 융합되는지 확인해 보세요.";

pub const PLANT_PROMPT: &str =
    "생각해보기: AI가 이 판단을 어떻게 내렸을까요? 색상, 크기, 모양 중 어떤 요소가 중요했을까요?";

pub const MINING_PROMPT: &str = "분석 결과 해석: 위 차트는 학생들의 생각에서 자주 등장하는 단어를 보여줍니다. \
어떤 단어가 많이 나왔나요? 이는 어떤 생각을 반영할까요?";

pub struct Tip {
    pub heading: &'static str,
    pub body: &'static str,
}

pub fn tips(item: MenuItem) -> &'static [Tip] {
    match item {
        MenuItem::EthicsVideo => &[
            Tip {
                heading: "AI 윤리란?",
                body: "인공지능이 인간과 사회에 해를 끼치지 않도록 사용하는 규칙과 태도입니다.",
            },
            Tip {
                heading: "스마트팜 예시",
                body: "온도 센서를 활용해 자동으로 물을 주는 시스템을 설계해보세요.",
            },
            Tip {
                heading: "생각해볼 점",
                body: "AI가 잘못 판단하면 어떤 일이 생길까요? 누가 책임을 져야 할까요?",
            },
        ],
        MenuItem::PlantAnalysis => &[
            Tip {
                heading: "식물 건강 분석이란?",
                body: "AI는 식물의 색상, 모양 등을 분석하여 건강 상태를 판단할 수 있습니다.",
            },
            Tip {
                heading: "스마트팜에서의 활용",
                body: "AI가 식물의 상태를 모니터링하여 물이나 영양분을 자동으로 공급하도록 설정할 수 있습니다.",
            },
            Tip {
                heading: "주의할 점",
                body: "AI의 판단이 항상 정확할까요? 잘못된 판단을 줄이려면 어떤 데이터를 더 수집해야 할까요?",
            },
        ],
        MenuItem::TextMining => &[
            Tip {
                heading: "텍스트 마이닝이란?",
                body: "텍스트 데이터를 분석하여 중요한 단어나 패턴을 찾아내는 기술입니다.",
            },
            Tip {
                heading: "스마트팜과의 연관성",
                body: "텍스트 마이닝은 농업 데이터를 분석해 농부의 의견이나 문제를 파악하는 데 사용될 수 있습니다.",
            },
            Tip {
                heading: "생각해볼 점",
                body: "자주 등장하는 단어는 어떤 의미를 가질까요? AI가 이를 어떻게 활용할 수 있을까요?",
            },
        ],
        MenuItem::ViewSubmissions => &[Tip {
            heading: "함께 읽어보기",
            body: "친구들의 생각 중 나와 다른 관점은 무엇인가요?",
        }],
    }
}

//! Prompt templates for coin analysis.
//!
//! Template wording is treated as configuration. What the code guarantees is
//! the structure: every requested coin appears once per occurrence, in input
//! order, and each template carries its language's recommendation values and
//! disclaimer sentence.

use std::fmt;

/// Output language of an analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    English,
    Korean,
}

impl Language {
    /// Resolve the `lang` request field. Only the exact code `ko` selects
    /// Korean; anything else, including a missing value, falls back to English.
    pub fn from_code(code: Option<&str>) -> Self {
        match code {
            Some("ko") => Language::Korean,
            _ => Language::English,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Korean => "ko",
        }
    }

    /// Sentence every per-coin opinion must end with.
    pub fn disclaimer(self) -> &'static str {
        match self {
            Language::English => {
                "This is not financial advice, and all investment decisions are your own responsibility."
            }
            Language::Korean => "이 내용은 투자 조언이 아니며, 모든 투자 결정의 책임은 본인에게 있습니다.",
        }
    }

    /// The three allowed `recommendation` values.
    pub fn recommendations(self) -> [&'static str; 3] {
        match self {
            Language::English => ["Buy", "Hold", "Sell"],
            Language::Korean => ["매수", "보유", "매도"],
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Join coin names into the human-readable list embedded in the prompt.
pub fn join_coins<S: AsRef<str>>(coins: &[S]) -> String {
    coins
        .iter()
        .map(|c| c.as_ref())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Build the analysis prompt for `coins` in `lang`.
pub fn build_prompt<S: AsRef<str>>(lang: Language, coins: &[S]) -> String {
    let coin_list = join_coins(coins);
    let [buy, hold, sell] = lang.recommendations();
    let disclaimer = lang.disclaimer();

    match lang {
        Language::Korean => format!(
            "당신은 암호화폐 시장 분석 전문가입니다. 다음 코인들을 각각 분석해 주세요: {coin_list}.\n\
             \n\
             요구 사항:\n\
             1. 목록에 있는 모든 코인을 빠짐없이 하나씩 분석하세요.\n\
             2. 응답은 반드시 지정된 JSON 스키마를 정확히 따르세요.\n\
             3. 웹 검색으로 확인한 최신 시세, 뉴스, 온체인 데이터에 근거해 판단하세요.\n\
             4. 어느 코인에나 해당될 법한 일반적이고 막연한 문장은 피하고 구체적으로 작성하세요.\n\
             5. recommendation 값은 \"{buy}\", \"{hold}\", \"{sell}\" 중 하나만 사용하세요.\n\
             6. priceTarget에는 단기(1~4주) 목표 가격을 제시하세요.\n\
             7. relatedNews에는 분석 근거가 된 최신 기사의 제목과 URL을 넣으세요.\n\
             8. 각 코인의 opinion 마지막에는 반드시 다음 문장을 그대로 붙이세요: \"{disclaimer}\"\n\
             \n\
             모든 내용은 한국어로 작성하세요."
        ),
        Language::English => format!(
            "You are an expert cryptocurrency market analyst. Analyze each of the following coins: {coin_list}.\n\
             \n\
             Requirements:\n\
             1. Cover every coin in the list, one entry per coin, without skipping any.\n\
             2. The response must follow the provided JSON schema exactly.\n\
             3. Base every claim on current prices, news and on-chain data found through web search.\n\
             4. Avoid generic filler that could apply to any coin; be specific.\n\
             5. Use exactly one of \"{buy}\", \"{hold}\" or \"{sell}\" for recommendation.\n\
             6. Give a near-term (1-4 weeks) price target in priceTarget.\n\
             7. List the recent articles your analysis relies on in relatedNews, with title and URL.\n\
             8. End every opinion with this exact sentence: \"{disclaimer}\"\n\
             \n\
             Write everything in English."
        ),
    }
}

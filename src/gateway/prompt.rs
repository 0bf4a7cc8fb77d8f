pub const SYSTEM_PROMPT: &str = "日本語で応答。必ずJSONオブジェクトのみを返す。";

const RUBRIC: &str = r#"あなたは厳格だが公平な審査員です。以下の作品を読み、
1) 自然さ nat（0〜50）
2) 独創性 cre（0〜50）
を採点し、合計 tot = nat + cre（0〜100）を算出してください。

【全体の分布ルール】
- 採点はやや厳格だが、不当に低得点に寄せない。
- 全体の平均は総合30〜40点程度を目安とする。
- 60点以上の作品は全体の5〜10%程度出てよい。
- 70点以上は1000回に数回程度の優れた作品とする。
- 80点以上はごく稀だが、不可能ではない特別な評価とする。

【スコア表現のルール】
- スコアは必ず小数第1位（例: 27.3）。整数のみは禁止。
- .0 と .5 に偏らせない。
- tot は nat + cre を小数第1位で丸めた値。
- ときどき nat と cre に大きめの差が出ても良い。

【造語と説明文の関係】
- 造語にはもともと明確な意味はないものと仮定する。
- 説明文が造語の意味や由来を説明している必要はない。
- 日本語として文法的に成立し、内容や情景が読めるなら評価対象として十分とみなす。

【文章の質と下限】
- 文法的におおむね成立し、話題が理解でき、複数の語句から構成される文章は「普通の文章」とみなす。
- 普通の文章の tot は10点未満にしない。多くは20点前後〜40点台、平均的な出来なら30〜50点程度。
- 内容が荒唐無稽でも、日本語として読めるなら解釈不能とはみなさない。

【解釈不能の扱い】
- 同じ文字・記号の連打が大部分を占める、断片が並ぶだけ、または10文字未満で内容が読み取れない場合のみ解釈不能とする。
- 解釈不能なら nat と cre は 0〜5 点に収める。

【コメントのトーンと長さ】
- 0-30点: 辛辣に批評する。人格攻撃はしない。100-200字程度。
- 31-60点: 冷静かつ客観的に、良い点と課題点をバランスよく。200-350字程度。
- 61-100点: 美辞麗句を尽くして絶賛する。350-500字程度。
コメントは感想のみ。助言・提案・改善案は禁止。

出力は JSON のみ：
{"nat": number, "cre": number, "tot": number, "comment": string, "uninterpretable": boolean}"#;

pub fn build_user_prompt(word: &str, text: &str) -> String {
    format!("{RUBRIC}\n\n【造語】{word}\n【文章】{text}")
}

#[cfg(test)]
#[path = "../../tests/src_inline/gateway/prompt.rs"]
mod tests;

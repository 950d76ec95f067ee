/// Sentence every generated script has to open with.
pub const OPENING_PHRASE: &str = "วันนี้เราจะมาพูดถึงเรื่อง...";

pub fn language_name(code: &str) -> &str {
    match code {
        "th" => "ภาษาไทย",
        "en" => "ภาษาอังกฤษ",
        _ => code,
    }
}

/// Single-speaker narration prompt, roughly one minute spoken, no markup.
pub fn script_prompt(title: &str, prompt: &str, language: &str) -> String {
    let lang_name = language_name(language);

    format!(
        r#"
กรุณาสร้างสคริปต์พอดแคสต์สำหรับผู้พูดคนเดียว โดยเริ่มต้นด้วยประโยค "{opening}" จากนั้นให้เขียนเนื้อหาในลักษณะคำพูดต่อเนื่อง อธิบายเนื้อหาให้ชัดเจน ครอบคลุมหัวข้อที่กำหนด โดยไม่ต้องมีเสียงประกอบ คำแนะนำ หรือรูปแบบพิเศษ เช่น ##, *, หรือ [] เน้นให้เป็นประโยคที่สามารถนำไปสร้างเสียงพูดต่อเนื่องด้วย voice bot ได้ทันที

หัวข้อพอดแคสต์: {title}
แนวคิดหรือหัวข้อ: {prompt}

ความยาว: ประมาณ 1 นาทีเมื่อพูดออกเสียง
ภาษา: {lang_name}
โทน: เป็นกันเอง ฟังง่าย
ห้ามใส่การแนะนำตัว
"#,
        opening = OPENING_PHRASE,
        title = title,
        prompt = prompt,
        lang_name = lang_name,
    )
}

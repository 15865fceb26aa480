// Benchmark helpers are only reached from bench targets, which dead code
// analysis does not see.
#[allow(dead_code)]
pub fn generate_markup(blocks: usize) -> String {
    let base = "<b>Parish Notices</b><br>Mass at 10<s>am</s> on <u>Sunday</u><br><br>\
                <ul>Choir practice<br><i>Coffee</i> after Mass</ul><br>\
                Weird <xyz> tag and a stray < bracket<br>";
    base.repeat(blocks)
}

#[allow(dead_code)]
pub fn generate_plain_text(words: usize) -> String {
    "lorem ".repeat(words)
}

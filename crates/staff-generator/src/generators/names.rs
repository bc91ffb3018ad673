//! Deterministic person names.
//!
//! Names come from fixed surname and given-name tables indexed by the row
//! index, so `SURNAMES.len() * GIVEN_NAMES.len()` consecutive indexes never
//! repeat a pair.

/// Surnames as (ideogram, pinyin).
pub const SURNAMES: &[(&str, &str)] = &[
    ("王", "wang"),
    ("李", "li"),
    ("张", "zhang"),
    ("刘", "liu"),
    ("陈", "chen"),
    ("杨", "yang"),
    ("黄", "huang"),
    ("赵", "zhao"),
    ("吴", "wu"),
    ("周", "zhou"),
    ("徐", "xu"),
    ("孙", "sun"),
    ("马", "ma"),
    ("朱", "zhu"),
    ("胡", "hu"),
    ("郭", "guo"),
    ("何", "he"),
    ("高", "gao"),
    ("林", "lin"),
    ("罗", "luo"),
    ("郑", "zheng"),
    ("梁", "liang"),
    ("谢", "xie"),
    ("宋", "song"),
    ("唐", "tang"),
    ("许", "xu"),
    ("韩", "han"),
    ("冯", "feng"),
    ("邓", "deng"),
    ("曹", "cao"),
    ("彭", "peng"),
    ("曾", "zeng"),
    ("肖", "xiao"),
    ("田", "tian"),
    ("董", "dong"),
    ("袁", "yuan"),
    ("潘", "pan"),
    ("于", "yu"),
    ("蒋", "jiang"),
    ("蔡", "cai"),
];

/// Given names as (ideograms, pinyin).
pub const GIVEN_NAMES: &[(&str, &str)] = &[
    ("伟", "wei"),
    ("芳", "fang"),
    ("娜", "na"),
    ("秀英", "xiuying"),
    ("敏", "min"),
    ("静", "jing"),
    ("丽", "li"),
    ("强", "qiang"),
    ("磊", "lei"),
    ("军", "jun"),
    ("洋", "yang"),
    ("勇", "yong"),
    ("艳", "yan"),
    ("杰", "jie"),
    ("娟", "juan"),
    ("涛", "tao"),
    ("明", "ming"),
    ("超", "chao"),
    ("秀兰", "xiulan"),
    ("霞", "xia"),
    ("平", "ping"),
    ("刚", "gang"),
    ("桂英", "guiying"),
    ("建华", "jianhua"),
    ("建国", "jianguo"),
    ("志强", "zhiqiang"),
    ("文", "wen"),
    ("辉", "hui"),
    ("鑫", "xin"),
    ("宇", "yu"),
    ("浩", "hao"),
    ("婷", "ting"),
    ("晨", "chen"),
    ("思远", "siyuan"),
    ("子涵", "zihan"),
    ("梓萱", "zixuan"),
    ("俊杰", "junjie"),
    ("雨桐", "yutong"),
    ("嘉怡", "jiayi"),
    ("博文", "bowen"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PersonName {
    pub surname: &'static str,
    pub given_name: &'static str,
    pub surname_latin: &'static str,
    pub given_latin: &'static str,
}

impl PersonName {
    pub fn full_name(&self) -> String {
        format!("{}{}", self.surname, self.given_name)
    }
}

/// Name for the person at `index`.
pub fn person_name(index: u64) -> PersonName {
    let surnames = SURNAMES.len() as u64;
    let given = GIVEN_NAMES.len() as u64;

    let (surname, surname_latin) = SURNAMES[(index % surnames) as usize];
    let (given_name, given_latin) = GIVEN_NAMES[((index / surnames) % given) as usize];

    PersonName {
        surname,
        given_name,
        surname_latin,
        given_latin,
    }
}

//! Static chapter catalog: id, Arabic name, transliterated name and verse count

use serde::Serialize;

pub const CHAPTER_COUNT: u32 = 114;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Chapter {
    pub id: u32,
    pub name: &'static str,
    pub transliterated_name: &'static str,
    pub verse_count: u32,
}

impl Chapter {
    const fn new(id: u32, name: &'static str, transliterated_name: &'static str, verse_count: u32) -> Self {
        Self { id, name, transliterated_name, verse_count }
    }
}

/// Look up a chapter by its 1-based id
pub fn get(chapter_id: u32) -> Option<&'static Chapter> {
    let index = chapter_id.checked_sub(1)? as usize;
    CHAPTERS.get(index)
}

pub fn all() -> &'static [Chapter] {
    &CHAPTERS
}

// Indexed by id - 1
static CHAPTERS: [Chapter; CHAPTER_COUNT as usize] = [
    Chapter::new(1, "الفاتحة", "Al-Fatihah", 7),
    Chapter::new(2, "البقرة", "Al-Baqarah", 286),
    Chapter::new(3, "آل عمران", "Ali 'Imran", 200),
    Chapter::new(4, "النساء", "An-Nisa", 176),
    Chapter::new(5, "المائدة", "Al-Ma'idah", 120),
    Chapter::new(6, "الأنعام", "Al-An'am", 165),
    Chapter::new(7, "الأعراف", "Al-A'raf", 206),
    Chapter::new(8, "الأنفال", "Al-Anfal", 75),
    Chapter::new(9, "التوبة", "At-Tawbah", 129),
    Chapter::new(10, "يونس", "Yunus", 109),
    Chapter::new(11, "هود", "Hud", 123),
    Chapter::new(12, "يوسف", "Yusuf", 111),
    Chapter::new(13, "الرعد", "Ar-Ra'd", 43),
    Chapter::new(14, "إبراهيم", "Ibrahim", 52),
    Chapter::new(15, "الحجر", "Al-Hijr", 99),
    Chapter::new(16, "النحل", "An-Nahl", 128),
    Chapter::new(17, "الإسراء", "Al-Isra", 111),
    Chapter::new(18, "الكهف", "Al-Kahf", 110),
    Chapter::new(19, "مريم", "Maryam", 98),
    Chapter::new(20, "طه", "Taha", 135),
    Chapter::new(21, "الأنبياء", "Al-Anbya", 112),
    Chapter::new(22, "الحج", "Al-Hajj", 78),
    Chapter::new(23, "المؤمنون", "Al-Mu'minun", 118),
    Chapter::new(24, "النور", "An-Nur", 64),
    Chapter::new(25, "الفرقان", "Al-Furqan", 77),
    Chapter::new(26, "الشعراء", "Ash-Shu'ara", 227),
    Chapter::new(27, "النمل", "An-Naml", 93),
    Chapter::new(28, "القصص", "Al-Qasas", 88),
    Chapter::new(29, "العنكبوت", "Al-'Ankabut", 69),
    Chapter::new(30, "الروم", "Ar-Rum", 60),
    Chapter::new(31, "لقمان", "Luqman", 34),
    Chapter::new(32, "السجدة", "As-Sajdah", 30),
    Chapter::new(33, "الأحزاب", "Al-Ahzab", 73),
    Chapter::new(34, "سبإ", "Saba", 54),
    Chapter::new(35, "فاطر", "Fatir", 45),
    Chapter::new(36, "يس", "Ya-Sin", 83),
    Chapter::new(37, "الصافات", "As-Saffat", 182),
    Chapter::new(38, "ص", "Sad", 88),
    Chapter::new(39, "الزمر", "Az-Zumar", 75),
    Chapter::new(40, "غافر", "Ghafir", 85),
    Chapter::new(41, "فصلت", "Fussilat", 54),
    Chapter::new(42, "الشورى", "Ash-Shuraa", 53),
    Chapter::new(43, "الزخرف", "Az-Zukhruf", 89),
    Chapter::new(44, "الدخان", "Ad-Dukhan", 59),
    Chapter::new(45, "الجاثية", "Al-Jathiyah", 37),
    Chapter::new(46, "الأحقاف", "Al-Ahqaf", 35),
    Chapter::new(47, "محمد", "Muhammad", 38),
    Chapter::new(48, "الفتح", "Al-Fath", 29),
    Chapter::new(49, "الحجرات", "Al-Hujurat", 18),
    Chapter::new(50, "ق", "Qaf", 45),
    Chapter::new(51, "الذاريات", "Adh-Dhariyat", 60),
    Chapter::new(52, "الطور", "At-Tur", 49),
    Chapter::new(53, "النجم", "An-Najm", 62),
    Chapter::new(54, "القمر", "Al-Qamar", 55),
    Chapter::new(55, "الرحمن", "Ar-Rahman", 78),
    Chapter::new(56, "الواقعة", "Al-Waqi'ah", 96),
    Chapter::new(57, "الحديد", "Al-Hadid", 29),
    Chapter::new(58, "المجادلة", "Al-Mujadila", 22),
    Chapter::new(59, "الحشر", "Al-Hashr", 24),
    Chapter::new(60, "الممتحنة", "Al-Mumtahanah", 13),
    Chapter::new(61, "الصف", "As-Saf", 14),
    Chapter::new(62, "الجمعة", "Al-Jumu'ah", 11),
    Chapter::new(63, "المنافقون", "Al-Munafiqun", 11),
    Chapter::new(64, "التغابن", "At-Taghabun", 18),
    Chapter::new(65, "الطلاق", "At-Talaq", 12),
    Chapter::new(66, "التحريم", "At-Tahrim", 12),
    Chapter::new(67, "الملك", "Al-Mulk", 30),
    Chapter::new(68, "القلم", "Al-Qalam", 52),
    Chapter::new(69, "الحاقة", "Al-Haqqah", 52),
    Chapter::new(70, "المعارج", "Al-Ma'arij", 44),
    Chapter::new(71, "نوح", "Nuh", 28),
    Chapter::new(72, "الجن", "Al-Jinn", 28),
    Chapter::new(73, "المزمل", "Al-Muzzammil", 20),
    Chapter::new(74, "المدثر", "Al-Muddaththir", 56),
    Chapter::new(75, "القيامة", "Al-Qiyamah", 40),
    Chapter::new(76, "الإنسان", "Al-Insan", 31),
    Chapter::new(77, "المرسلات", "Al-Mursalat", 50),
    Chapter::new(78, "النبإ", "An-Naba", 40),
    Chapter::new(79, "النازعات", "An-Nazi'at", 46),
    Chapter::new(80, "عبس", "'Abasa", 42),
    Chapter::new(81, "التكوير", "At-Takwir", 29),
    Chapter::new(82, "الانفطار", "Al-Infitar", 19),
    Chapter::new(83, "المطففين", "Al-Mutaffifin", 36),
    Chapter::new(84, "الانشقاق", "Al-Inshiqaq", 25),
    Chapter::new(85, "البروج", "Al-Buruj", 22),
    Chapter::new(86, "الطارق", "At-Tariq", 17),
    Chapter::new(87, "الأعلى", "Al-A'la", 19),
    Chapter::new(88, "الغاشية", "Al-Ghashiyah", 26),
    Chapter::new(89, "الفجر", "Al-Fajr", 30),
    Chapter::new(90, "البلد", "Al-Balad", 20),
    Chapter::new(91, "الشمس", "Ash-Shams", 15),
    Chapter::new(92, "الليل", "Al-Layl", 21),
    Chapter::new(93, "الضحى", "Ad-Duhaa", 11),
    Chapter::new(94, "الشرح", "Ash-Sharh", 8),
    Chapter::new(95, "التين", "At-Tin", 8),
    Chapter::new(96, "العلق", "Al-'Alaq", 19),
    Chapter::new(97, "القدر", "Al-Qadr", 5),
    Chapter::new(98, "البينة", "Al-Bayyinah", 8),
    Chapter::new(99, "الزلزلة", "Az-Zalzalah", 8),
    Chapter::new(100, "العاديات", "Al-'Adiyat", 11),
    Chapter::new(101, "القارعة", "Al-Qari'ah", 11),
    Chapter::new(102, "التكاثر", "At-Takathur", 8),
    Chapter::new(103, "العصر", "Al-'Asr", 3),
    Chapter::new(104, "الهمزة", "Al-Humazah", 9),
    Chapter::new(105, "الفيل", "Al-Fil", 5),
    Chapter::new(106, "قريش", "Quraysh", 4),
    Chapter::new(107, "الماعون", "Al-Ma'un", 7),
    Chapter::new(108, "الكوثر", "Al-Kawthar", 3),
    Chapter::new(109, "الكافرون", "Al-Kafirun", 6),
    Chapter::new(110, "النصر", "An-Nasr", 3),
    Chapter::new(111, "المسد", "Al-Masad", 5),
    Chapter::new(112, "الإخلاص", "Al-Ikhlas", 4),
    Chapter::new(113, "الفلق", "Al-Falaq", 5),
    Chapter::new(114, "الناس", "An-Nas", 6),
];

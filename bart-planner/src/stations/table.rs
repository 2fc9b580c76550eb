//! The BART station table.
//!
//! Order matters: directory iteration and search results follow it.

pub(super) const BART_STATIONS: &[(&str, &str)] = &[
    ("12th St. Oakland City Center", "12th"),
    ("16th St. Mission (SF)", "16th"),
    ("19th St. Oakland", "19th"),
    ("24th St. Mission (SF)", "24th"),
    ("Ashby (Berkeley)", "ashb"),
    ("Antioch", "antc"),
    ("Balboa Park (SF)", "balb"),
    ("Bay Fair (San Leandro)", "bayf"),
    ("Berryessa / North San Jose", "bery"),
    ("Castro Valley", "cast"),
    ("Civic Center (SF)", "civc"),
    ("Coliseum", "cols"),
    ("Colma", "colm"),
    ("Concord", "conc"),
    ("Daly City", "daly"),
    ("Downtown Berkeley", "dbrk"),
    ("Dublin/Pleasanton", "dubl"),
    ("El Cerrito del Norte", "deln"),
    ("El Cerrito Plaza", "plza"),
    ("Embarcadero (SF)", "embr"),
    ("Fremont", "frmt"),
    ("Fruitvale (Oakland)", "ftvl"),
    ("Glen Park (SF)", "glen"),
    ("Hayward", "hayw"),
    ("Lafayette", "lafy"),
    ("Lake Merritt (Oakland)", "lake"),
    ("MacArthur (Oakland)", "mcar"),
    ("Millbrae", "mlbr"),
    ("Milpitas", "mlpt"),
    ("Montgomery St. (SF)", "mont"),
    ("North Berkeley", "nbrk"),
    ("North Concord/Martinez", "ncon"),
    ("Oakland Int'l Airport", "oakl"),
    ("Orinda", "orin"),
    ("Pittsburg/Bay Point", "pitt"),
    ("Pittsburg Center", "pctr"),
    ("Pleasant Hill", "phil"),
    ("Powell St. (SF)", "powl"),
    ("Richmond", "rich"),
    ("Rockridge (Oakland)", "rock"),
    ("San Bruno", "sbrn"),
    ("San Francisco Int'l Airport", "sfia"),
    ("San Leandro", "sanl"),
    ("South Hayward", "shay"),
    ("South San Francisco", "ssan"),
    ("Union City", "ucty"),
    ("Warm Springs/South Fremont", "warm"),
    ("Walnut Creek", "wcrk"),
    ("West Dublin", "wdub"),
    ("West Oakland", "woak"),
];

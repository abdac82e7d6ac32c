//! Built-in gazetteer: known neighbourhoods and areas for each state.
//!
//! Order within a state matters only for display; matching walks the
//! geocoder's segments first and this list second. The table is `const`
//! data and has no write path.

use super::states::CanonicalState;

const GAZETTEER: &[(CanonicalState, &[&str])] = &[
    (CanonicalState::Abia, &[
        "Umuahia", "Aba", "Ogbor Hill", "Osisioma", "Ohafia", "Arochukwu",
        "World Bank", "Ariaria", "Isiala Ngwa", "Umuobiakwa",
    ]),
    (CanonicalState::Adamawa, &[
        "Jimeta", "Yola Town", "Karewa", "Mubi", "Numan", "Girei", "Ganye",
    ]),
    (CanonicalState::AkwaIbom, &[
        "Ewet Housing Estate", "Shelter Afrique", "Osongama Estate", "Nwaniba",
        "Oron Road", "Ikot Ekpene", "Eket", "Oron", "Ibeno", "Itam", "Uyo",
    ]),
    (CanonicalState::Anambra, &[
        "Awka", "Onitsha", "GRA Onitsha", "Fegge", "Nnewi", "Amawbia",
        "Okpuno", "Ekwulobia", "Ogidi", "Nkpor", "Obosi", "Oko",
    ]),
    (CanonicalState::Bauchi, &[
        "Wunti", "Yelwa", "Gwallaga", "Kobi", "Azare", "Misau",
    ]),
    (CanonicalState::Bayelsa, &[
        "Yenagoa", "Amarata", "Okaka", "Opolo", "Swali", "Kpansia", "Ovom",
    ]),
    (CanonicalState::Benue, &[
        "Makurdi", "Wurukum", "North Bank", "High Level", "Gboko", "Otukpo", "Katsina-Ala",
    ]),
    (CanonicalState::Borno, &[
        "Maiduguri", "Bulumkutu", "Gwange", "Old GRA", "Pompomari", "Biu",
    ]),
    (CanonicalState::CrossRiver, &[
        "Calabar Municipal", "Calabar South", "Marian", "Diamond Hill",
        "State Housing Estate", "Ikom", "Ogoja", "Obudu", "Akamkpa",
    ]),
    (CanonicalState::Delta, &[
        "Asaba", "Okpanam", "Cable Point", "Warri", "Effurun", "Ekpan",
        "Udu", "Sapele", "Ughelli", "Agbor", "Oghara",
    ]),
    (CanonicalState::Ebonyi, &[
        "Abakaliki", "Kpirikpiri", "Onueke", "Afikpo", "Ezzamgbo",
    ]),
    (CanonicalState::Edo, &[
        "GRA Benin", "Ugbowo", "Ikpoba Hill", "Uselu", "Sapele Road",
        "Ekenwan", "Aduwawa", "Oredo", "Auchi", "Ekpoma", "Uromi",
    ]),
    (CanonicalState::Ekiti, &[
        "Ado Ekiti", "Ikere", "Ijero", "Ikole", "Efon Alaaye", "Ise",
    ]),
    (CanonicalState::Enugu, &[
        "Independence Layout", "GRA Enugu", "New Haven", "Trans Ekulu",
        "Achara Layout", "Uwani", "Abakpa Nike", "Emene", "Ogui",
        "Coal Camp", "Nsukka", "Awkunanaw",
    ]),
    (CanonicalState::Fct, &[
        "Garki", "Wuse", "Wuse 2", "Maitama", "Asokoro", "Jabi", "Utako",
        "Gwarinpa", "Kubwa", "Lugbe", "Life Camp", "Katampe", "Jahi",
        "Lokogoma", "Apo", "Gudu", "Durumi", "Kado", "Mabushi", "Wuye",
        "Dawaki", "Karu", "Nyanya", "Kuje", "Bwari", "Galadimawa", "Karsana",
        "Idu", "Dutse", "Guzape", "Kaura", "Dakwo", "Gaduwa", "Mpape",
        "Central Business District", "Gwagwalada",
    ]),
    (CanonicalState::Gombe, &[
        "Pantami", "Tudun Wada", "Bolari", "Herwagana", "Kumo",
    ]),
    (CanonicalState::Imo, &[
        "Owerri", "New Owerri", "Ikenegbu", "World Bank Housing Estate",
        "Aladinma", "Orji", "Egbu", "Okigwe", "Orlu",
    ]),
    (CanonicalState::Jigawa, &[
        "Dutse Town", "Hadejia", "Gumel", "Kazaure", "Birnin Kudu",
    ]),
    (CanonicalState::Kaduna, &[
        "Barnawa", "Malali", "Ungwan Rimi", "Kabala", "Sabon Tasha",
        "Narayi", "Kawo", "Television", "Zaria", "Kafanchan",
    ]),
    (CanonicalState::Kano, &[
        "Nassarawa GRA", "Bompai", "Sabon Gari", "Tarauni", "Gyadi-Gyadi",
        "Hotoro", "Sharada", "Fagge", "Dala", "Kumbotso", "Ungogo",
    ]),
    (CanonicalState::Katsina, &[
        "Kofar Kaura", "Kofar Marusa", "Funtua", "Daura", "Malumfashi",
    ]),
    (CanonicalState::Kebbi, &[
        "Birnin Kebbi", "Argungu", "Yauri", "Zuru", "Jega",
    ]),
    (CanonicalState::Kogi, &[
        "Lokoja", "Lokongoma", "Felele", "Ganaja", "Okene", "Kabba", "Idah", "Anyigba",
    ]),
    (CanonicalState::Kwara, &[
        "GRA Ilorin", "Tanke", "Fate", "Basin", "Gaa Akanbi", "Adewole",
        "Offa", "Omu-Aran",
    ]),
    (CanonicalState::Lagos, &[
        "Lekki Phase 1", "Lekki", "Victoria Island", "Ikoyi", "Banana Island",
        "Ikeja", "Ikeja GRA", "Yaba", "Surulere", "Ajah", "Sangotedo",
        "Chevron", "Osapa London", "Agungi", "Ikate", "Jakande", "Ilasan",
        "Awoyaya", "Ibeju-Lekki", "Magodo", "Gbagada", "Maryland", "Ogudu",
        "Ojota", "Ketu", "Festac Town", "Amuwo Odofin", "Apapa", "Oshodi",
        "Isolo", "Ejigbo", "Ikotun", "Ikorodu", "Epe", "Badagry", "Ilupeju",
        "Anthony Village", "Ojodu", "Omole Phase 1", "Omole Phase 2", "Opebi",
        "Allen Avenue", "Alausa", "Ogba", "Agege", "Ebute Metta", "Obalende",
        "Lagos Island", "Oworonshoki", "Berger", "Isheri", "Parkview Estate",
        "Dolphin Estate", "Abraham Adesanya", "Ojo", "Mushin",
    ]),
    (CanonicalState::Nasarawa, &[
        "Lafia", "Keffi", "Akwanga", "Mararaba", "Masaka", "New Karu", "Nasarawa Town",
    ]),
    (CanonicalState::Niger, &[
        "Minna", "Tunga", "Bosso", "Chanchaga", "Suleja", "Bida", "Kontagora",
    ]),
    (CanonicalState::Ogun, &[
        "Abeokuta", "Ibara", "Oke Mosan", "Asero", "Ijebu Ode", "Sagamu",
        "Ota", "Sango Ota", "Mowe", "Ibafo", "Magboro", "Arepo", "Ifo",
    ]),
    (CanonicalState::Ondo, &[
        "Alagbaka", "Ijapo Estate", "Oba Ile", "Akure", "Ondo Town", "Owo", "Okitipupa",
    ]),
    (CanonicalState::Osun, &[
        "Osogbo", "Oke Fia", "Ilesa", "Ile-Ife", "Ede", "Ikirun", "Iwo",
    ]),
    (CanonicalState::Oyo, &[
        "Bodija", "Jericho", "Oluyole Estate", "Ring Road", "Challenge",
        "Akobo", "Agodi GRA", "Samonda", "Mokola", "Dugbe", "Iwo Road",
        "Apete", "Ogbomoso", "Oyo Town", "Iseyin", "Saki",
    ]),
    (CanonicalState::Plateau, &[
        "Rayfield", "Bukuru", "Jos North", "Jos South", "Tudun Wada Jos",
        "Lamingo", "Angwan Rukuba", "Pankshin",
    ]),
    (CanonicalState::Rivers, &[
        "GRA Phase 1", "GRA Phase 2", "Old GRA", "Trans Amadi", "Rumuokoro",
        "Rumuola", "Rumuibekwe", "Eliozu", "Elelenwo", "Woji", "Ada George",
        "Choba", "Rumuodara", "D-Line", "Diobu", "Borokiri", "Bonny",
        "Eleme", "Oyigbo", "Obio-Akpor",
    ]),
    (CanonicalState::Sokoto, &[
        "Arkilla", "Gawon Nama", "Mabera", "Runjin Sambo", "Tambuwal", "Wamakko",
    ]),
    (CanonicalState::Taraba, &[
        "Jalingo", "Mayo-Dassa", "Wukari", "Bali", "Gembu",
    ]),
    (CanonicalState::Yobe, &[
        "Damaturu", "Potiskum", "Gashua", "Nguru", "Geidam",
    ]),
    (CanonicalState::Zamfara, &[
        "Gusau", "Tudun Wada Gusau", "Kaura Namoda", "Talata Mafara", "Anka",
    ]),
];

/// Known areas for `state`, in gazetteer order.
pub fn areas(state: CanonicalState) -> &'static [&'static str] {
    GAZETTEER
        .iter()
        .find(|(s, _)| *s == state)
        .map(|(_, list)| *list)
        .unwrap_or(&[])
}

/// The gazetteer's own spelling of `name`, matched case-insensitively.
pub fn lookup(state: CanonicalState, name: &str) -> Option<&'static str> {
    let needle = name.trim();
    areas(state).iter().copied().find(|a| a.eq_ignore_ascii_case(needle))
}

/// Every state with its area count (for listing / API).
pub fn summary() -> Vec<(CanonicalState, usize)> {
    CanonicalState::ALL
        .iter()
        .map(|s| (*s, areas(*s).len()))
        .collect()
}

// src/lib.rs
//
// Bibliothèque : le noyau de calcul, sans dépendance à l’interface.
// La coque egui (src/main.rs + src/app/) ne passe que par cette API.

pub mod noyau;
